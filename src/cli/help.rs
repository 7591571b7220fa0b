//! Help message display for CLI.

#![allow(clippy::print_stdout)]

use crate::config::Config;

/// Print help message based on configuration state.
pub fn print_smart_help(config: &Config) {
    if config.model.path.is_none() {
        print_first_time_help();
    } else {
        print_configured_help();
    }
}

/// Print setup guide when no model is configured.
pub fn print_first_time_help() {
    println!("No model configured. Get started with Leafy:");
    println!();
    println!("1. Initialize configuration:");
    println!("   leafy config init");
    println!();
    println!("2. Set [model] path in the file shown by:");
    println!("   leafy config path");
    println!();
    println!("   or pass the model on each run with --model <plants.onnx>");
    println!();
    println!("3. Identify a photo:");
    println!("   leafy leaf.jpg");
    println!();
    println!("Run 'leafy labels' to see the species the model knows,");
    println!("or 'leafy -h' for all options.");
}

/// Print brief usage reminder for configured users.
pub fn print_configured_help() {
    println!("Usage: leafy <PHOTO> [OPTIONS]");
    println!();
    println!("Example: leafy leaf.jpg --output-mode json");
    println!();
    println!("Run 'leafy -h' for all options or 'leafy labels' to list species.");
}
