//! Terminal output for `dkenv list` and `dkenv apis`.

use crate::actions::InstalledEntry;
use colored::Colorize;

pub fn print_installed(entries: &[InstalledEntry]) {
    if entries.is_empty() {
        println!("{}", "No installed Docker binaries found!".yellow());
        return;
    }

    let mut sorted: Vec<&InstalledEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    println!("Found {} installed docker binaries", sorted.len());
    println!();
    for (i, entry) in sorted.iter().enumerate() {
        if entry.active {
            println!("{}: {} {}", i + 1, entry.name.green(), "(active)".green());
        } else {
            println!("{}: {}", i + 1, entry.name);
        }
    }
}

pub fn print_apis<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) {
    println!("{} {}", format!("{:<6}", "API").bold(), "Client".bold());
    for (api, client) in entries {
        println!("{api:<6} {client}");
    }
}
