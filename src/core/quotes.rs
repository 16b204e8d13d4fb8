use chrono::{
    Datelike,
    Local,
};

pub const QUOTES: &[&str] = &[
    "The 'Submit' button is your new best friend.",
    "Your future self is already at the office, waiting for you to finish this application.",
    "One 'Yes' is all you need to change your entire life.",
    "You miss 100% of the roles you don't apply for.",
    "Your dream job doesn't have your resume yet. Fix that.",
    "Success is just a series of 'Submits' away.",
    "Dress for the job you want, but apply for it in your pajamas.",
    "The expert in anything was once a nervous applicant.",
    "May your 'Quick Apply' buttons actually be quick.",
    "Currently seeking a job where my only responsibility is 'vibing'.",
    "I have 10 years of experience in being 22 years old.",
    "My resume is just a list of things I never want to do again.",
    "Entry level: Requires 5 years of experience and a Nobel Prize.",
    "I'm not unemployed, I'm a 'Private Consultant for my own Couch'.",
    "Applying to jobs: The only sport where you're ghosted more than on Tinder.",
    "Status: 404 - Job Not Found (Yet).",
    "Compiling your career... Please wait.",
    "Your resume is looking sharper than a freshly formatted crate.",
    "Error 200: User is too talented for this rejection letter.",
    "Importing 'Coffee'... Exporting 'Productivity'.",
    "git commit -m 'Applied to my dream job'.",
    "You're the #[must_use] of this application cycle.",
    "Go touch some grass, then touch some 'Submit' buttons.",
    "Manifesting a 'We'd like to schedule an interview' email for you.",
    "Your talent is a feature, not a bug.",
    "Keep going. Even the WiFi struggles sometimes.",
    "You are more than a PDF.",
    "Rejection is just redirection in a fancy suit.",
    "Apply today. Nap tomorrow.",
    "Building a career, one row at a time.",
];

/// Footer quote rotation: starts on the quote for the day of month, clicks advance it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRotation {
    index: usize,
}

impl QuoteRotation {
    pub fn for_day(day_of_month: u32) -> Self {
        let index = (day_of_month.max(1) as usize - 1) % QUOTES.len();
        Self { index }
    }

    pub fn today() -> Self {
        Self::for_day(Local::now().day())
    }

    pub fn current(&self) -> &'static str {
        QUOTES[self.index]
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % QUOTES.len();
    }
}

impl Default for QuoteRotation {
    fn default() -> Self {
        Self::today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_quote_wraps() {
        assert_eq!(QuoteRotation::for_day(1).current(), QUOTES[0]);
        assert_eq!(QuoteRotation::for_day(30).current(), QUOTES[29]);
        // 31st wraps back to the first quote
        assert_eq!(QuoteRotation::for_day(31).current(), QUOTES[0]);
    }

    #[test]
    fn test_advance_cycles() {
        let mut rotation = QuoteRotation::for_day(30);
        rotation.advance();
        assert_eq!(rotation.current(), QUOTES[0]);
        rotation.advance();
        assert_eq!(rotation.current(), QUOTES[1]);
    }
}
