// src/screens/home.rs
use crate::navigation::Screen;

pub const TAGLINE: &str = "Smart MRI analysis. Fast results. Anywhere you need it.";

#[derive(Debug, Default, Clone, Copy)]
pub struct HomeScreen;

impl HomeScreen {
    /// "Get Started" leads to the dashboard without parameters.
    pub fn get_started(&self) -> Screen {
        Screen::Dashboard
    }
}
