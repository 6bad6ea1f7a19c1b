//! Graphical front end for Transfer Saga.
//!
//! [`screen::StoryScreen`] joins the narrative engine to its dialog view and
//! is free of any graphics backend. The macroquad pieces ([`canvas`],
//! [`input`]) draw it and feed it keys.

pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod screen;
