use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("quill")
        .version("0.1.0")
        .author("Quill Contributors")
        .about("Extract author profiles from scotch.io pages")
        .arg(clap::arg!([AUTHOR] "Author name, e.g. \"chris\""))
        .arg(clap::arg!(--html <FILE> "Extract from a saved profile page, or '-' for stdin, instead of fetching"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--compact "Print JSON on a single line"))
        .arg(clap::arg!(--envelope "Wrap output in a {\"status\": ...} response envelope"))
        .arg(clap::arg!(--meta "Also print the page's open graph metadata"))
        .arg(clap::arg!(--base_url <URL> "Site origin for profile URLs and relative links").default_value("https://scotch.io"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "quill", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "quill", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "quill", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "quill", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
