mod config;
mod rendering;
mod resolution;
