//! imgcrop - crop placed images by rectangle or polygon reference
//!
//! Usage:
//!   imgcrop crop <job.json> [--dpi <value>]   Run a crop job, print the result as JSON
//!   imgcrop help                              Show this message
//!
//! Set `RUST_LOG=debug` to trace mapping and clipping decisions.

use std::env;
use std::path::Path;
use std::process;

mod host;
mod job;

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {} crop <job.json> [--dpi <value>]", program);
    eprintln!("  {} help", program);
    eprintln!();
    eprintln!("The job file places an image in model space and names a rect or");
    eprintln!("polygon crop reference. The cropped PNG is written next to the");
    eprintln!("source as <stem>_cropped_rect.png or <stem>_cropped_poly.png.");
}

fn cmd_crop(program: &str, args: &[String]) {
    let Some(job_path) = args.first() else {
        print_usage(program);
        process::exit(2);
    };

    let mut dpi: Option<f64> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dpi" => {
                i += 1;
                dpi = args.get(i).and_then(|v| v.parse().ok());
                if dpi.is_none() {
                    eprintln!("Error: --dpi needs a numeric value");
                    process::exit(2);
                }
            }
            other => {
                eprintln!("Error: unknown argument '{}'", other);
                process::exit(2);
            }
        }
        i += 1;
    }

    let result = host::load_job(Path::new(job_path)).and_then(|mut job| {
        if dpi.is_some() {
            job.image.resolution = dpi;
        }
        host::run_job(&job)
    });

    match result {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("imgcrop");

    match args.get(1).map(String::as_str) {
        Some("crop") => cmd_crop(program, &args[2..]),
        Some("help" | "--help" | "-h") => print_usage(program),
        _ => {
            print_usage(program);
            process::exit(2);
        }
    }
}
