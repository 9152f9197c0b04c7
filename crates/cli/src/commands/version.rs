//! `version`

pub fn print() {
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if let Some(sha) = option_env!("REPORTSYNC_GIT_SHA") {
        println!("GitSHA: {sha}");
    }
}
