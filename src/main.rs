//! `flycam [OPTIONS_TOML]`: open the fly-through cube viewer.
//!
//! WASD flies, the mouse looks around, the wheel zooms, R resets the camera
//! and Escape quits. Set `RUST_LOG=debug` for more output.

use std::path::Path;

use flycam::{FlycamError, Options, Viewer};

fn load_options() -> Result<Options, FlycamError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading options from {path}");
            Options::load(Path::new(&path))
        }
        None => Ok(Options::default()),
    }
}

fn main() {
    env_logger::init();

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
