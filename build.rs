//! Build script for the dxcasdoor crate.
//!
//! Makes the backend base URL available to `option_env!()` at compile time.
//!
//! Priority order:
//! 1. Environment variables already set (e.g., from CI/CD, system env)
//! 2. Variables from `.env` file (if it exists)
//! 3. Variables from `.env.example` file (fallback for CI builds)

use std::env;
use std::fs;
use std::path::PathBuf;

const BASE_URL_VAR: &str = "CASDOOR_API_BASE_URL";

fn main() {
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-env-changed={}", BASE_URL_VAR);

    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo"));
    let env_file = manifest_dir.join(".env");
    let env_example_file = manifest_dir.join(".env.example");

    if env::var(BASE_URL_VAR).is_ok() {
        println!(
            "cargo:warning=Using {} from the environment",
            BASE_URL_VAR
        );
        return;
    }

    let file_to_load = if env_file.exists() {
        Some(env_file)
    } else if env_example_file.exists() {
        Some(env_example_file)
    } else {
        None
    };

    let Some(file_path) = file_to_load else {
        println!(
            "cargo:warning={} not set and no .env file found; AuthConfig::from_env() will return None",
            BASE_URL_VAR
        );
        return;
    };

    let contents = fs::read_to_string(&file_path).expect("Failed to read env file");
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key == BASE_URL_VAR && env::var(key).is_err() {
                println!("cargo:rustc-env={}={}", key, value.trim());
            }
        }
    }
}
