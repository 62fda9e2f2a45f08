#![allow(non_snake_case)]

pub mod app;
pub mod cli;
pub mod clients;
pub mod clock;
pub mod config;
pub mod controllers;
pub mod error;
pub mod forms;
pub mod models;
pub mod pages;
pub mod render;
pub mod service;
