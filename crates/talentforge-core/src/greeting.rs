use chrono::{Local, Timelike};

/// Time-of-day greeting for the welcome screen.
pub fn greeting(hour: u32, name: &str) -> String {
    let salutation = if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!("{salutation}, {name}")
}

pub fn greeting_now(name: &str) -> String {
    greeting(Local::now().hour(), name)
}
