// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    // Using a raw string literal for the multi-line banner
    let banner = r#"
 _   _                      __     ___
| \ | | ___ _   _ _ __ ___  \ \   / (_) _____      __
|  \| |/ _ \ | | | '__/ _ \  \ \ / /| |/ _ \ \ /\ / /
| |\  |  __/ |_| | | | (_) |  \ V / | |  __/\ V  V /
|_| \_|\___|\__,_|_|  \___/    \_/  |_|\___| \_/\_/

    Brain MRI Tumor Classification Viewer
"#;
    println!("{}", banner);
}
