//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`,
//! mirrors `static/` into `dist/` for deployment, serves `static/` locally
//! and, when `PI_TRACE_NGROK` is set, exposes it via ngrok.
//!
//! `API_KEY` (and `PI_TRACE_MODEL` / `PI_TRACE_ENDPOINT`) are read from the
//! environment when the wasm is compiled, so set them before running this.

use std::env;
use std::path::Path;
use std::process::{Command, ExitCode, Stdio};

use pi_trace::site;

const DEFAULT_PORT: u16 = 8000;

fn main() -> ExitCode {
    let port = match env::var("PI_TRACE_PORT") {
        Ok(raw) => match raw.parse::<u16>() {
            Ok(port) => port,
            Err(err) => {
                eprintln!("PI_TRACE_PORT={raw:?} is not a port: {err}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => DEFAULT_PORT,
    };

    if env::var_os("API_KEY").is_none() {
        println!("API_KEY not set: the menu will show its fallback text.");
    }

    // 1. Compile the wasm bundle next to index.html
    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {
            // 2. Deployable copy, taken only once static/pkg is fresh
            match site::publish(Path::new("static"), Path::new("dist")) {
                Ok(bytes) => println!("Copied static/ to dist/ ({bytes} bytes)"),
                Err(err) => eprintln!("copying static/ to dist/ failed: {err}"),
            }
        }
        Ok(_) => {
            eprintln!(
                "wasm-pack finished with errors. \
                 Ensure wasm-pack is installed (https://rustwasm.github.io/wasm-pack/)."
            );
            return ExitCode::FAILURE;
        }
        Err(_) => {
            eprintln!(
                "wasm-pack not found in PATH. \
                 Skipping wasm build and dist/; the site may serve stale artifacts."
            );
        }
    }

    // 3. Serve static/
    let port_arg = port.to_string();
    println!("Launching local server at http://127.0.0.1:{port} …");
    let mut server = match Command::new("python3")
        .args(["-m", "http.server", port_arg.as_str(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            eprintln!("failed to start http server: {err}");
            return ExitCode::FAILURE;
        }
    };

    // 4. Optional public tunnel
    if env::var_os("PI_TRACE_NGROK").is_some() {
        match Command::new("ngrok")
            .args(["http", port_arg.as_str()])
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(_) => println!("ngrok tunnel starting …"),
            Err(_) => {
                eprintln!("ngrok not found. Install it to expose the site over the internet.")
            }
        }
    }

    // Keep running as long as the server does
    match server.wait() {
        Ok(status) if status.success() => ExitCode::SUCCESS,
        Ok(status) => {
            eprintln!("http server exited with {status}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("lost track of http server: {err}");
            ExitCode::FAILURE
        }
    }
}
