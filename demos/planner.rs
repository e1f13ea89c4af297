//! Interactive dive planner
//!
//! Reads depth, bottom time and gas from the console and prints the
//! decompression schedule together with the no-deco and no-fly times.
//! Every new set of inputs supersedes the previous calculation.
//!
//! Run with: `cargo run --example planner`
//! Set `RUST_LOG=dive_planner_deco=debug` to follow the scheduler.

use dive_planner_deco::session::Recalculator;
use dive_planner_deco::{DiveParameters, ModelConfig, Planner, PressureConvention};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn get_input<T: std::str::FromStr + std::fmt::Display + Copy>(prompt: &str, default: T) -> Option<T> {
    loop {
        let input = read_line(&format!("{} (default: {}): ", prompt, default))?;
        if input.is_empty() {
            return Some(default);
        }
        match input.parse::<T>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Invalid input. Please enter a valid number."),
        }
    }
}

fn get_convention() -> Option<PressureConvention> {
    loop {
        let input = read_line("Pressure convention [absolute/reference] (default: absolute): ")?;
        match input.to_lowercase().as_str() {
            "" | "a" | "absolute" => return Some(PressureConvention::Absolute),
            "r" | "reference" => return Some(PressureConvention::Reference),
            _ => println!("Please answer 'absolute' or 'reference'."),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Nitrogen Dive Planner ===\n");

    let Some(convention) = get_convention() else {
        return;
    };
    let recalculator = Recalculator::new(Planner::new(ModelConfig::with_convention(convention)));

    loop {
        println!("\nEnter dive parameters (Ctrl-D to quit):");
        let Some(depth_m) = get_input("Depth (m)", 18.0) else { break };
        let Some(bottom_time) = get_input("Bottom time (minutes)", 40u32) else { break };
        let Some(fo2) = get_input("Fraction of oxygen", 0.21) else { break };
        let Some(p_factor) = get_input("Conservatism factor (not applied)", 0i32) else { break };

        let params = DiveParameters {
            depth_m,
            bottom_time,
            fo2,
            p_factor,
        };

        match recalculator.recalculate(&params) {
            None => println!("Calculation superseded by a newer request."),
            Some(Err(e)) => println!("Cannot plan this dive: {}", e),
            Some(Ok(result)) => {
                println!("\nDepth (m) | Stop (min)");
                println!("----------|-----------");
                for (depth, minutes) in result.schedule.iter().rev() {
                    if minutes > 0 {
                        println!("   {:4}   |    {:3}", depth, minutes);
                    }
                }
                println!();
                println!("  N2 fraction:      {:.2}", result.f_n2);
                println!("  Deco:             {} min", result.deco_minutes);
                println!("  No-deco remaining:{:>3} min", result.no_deco_minutes);
                match result.no_fly_compartment {
                    Some(compartment) => println!(
                        "  No-fly:           {} min (compartment {})",
                        result.no_fly_minutes,
                        compartment + 1
                    ),
                    None => println!("  No-fly:           {} min", result.no_fly_minutes),
                }
            }
        }
    }
}
