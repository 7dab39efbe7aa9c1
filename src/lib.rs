// src/lib.rs - Library interface for the coloring page generator

pub mod config;
pub mod contours;
pub mod draw;
pub mod errors;
pub mod fill;
pub mod gui;
pub mod history;
pub mod image_io;
pub mod image_utils;
pub mod inpaint;
pub mod pipeline;
pub mod session;
pub mod threshold;

// Re-export commonly used types and functions
pub use config::Config;
pub use errors::{ColoringPageError, Result};
pub use history::EditHistory;
pub use image_io::{load_image, save_image, InputImage};
pub use pipeline::generate_page;
pub use session::{PointerButton, PointerEvent, PointerPhase, Session};

pub use contours::{polygon_area, post_process, ContourParams};
pub use fill::flood_fill;
pub use image_utils::fit_to_canvas;
