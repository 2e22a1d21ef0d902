//! Startup banner and farewell.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub model: &'a str,
    pub key_url: &'a str,
    pub completion_url: &'a str,
    pub typesetter: Option<&'a str>,
}

/// Build the startup banner with session info.
pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║               A B A C O               ║
   ║    arithmetic, answered in words      ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   model     {}
   api       {}
   key from  {}
   render    {}

   type an operation, /help for commands
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.model,
        info.completion_url,
        info.key_url,
        info.typesetter.unwrap_or("none"),
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

/// Print the session summary.
pub fn print_farewell(evaluations: usize) {
    if evaluations > 0 {
        println!("session: {evaluations} operation(s) evaluated");
    }
    println!("goodbye.");
}
