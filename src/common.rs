use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initializes logging under the running executable's name.
pub fn init_logger_exe() {
    let name = std::env::current_exe()
        .ok()
        .and_then(|path| path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string))
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
    init_logger(name);
}

/// Default filters and line format; no environment applied yet.
pub fn logger_builder(name: impl Into<String>) -> Builder {
    let crate_name = name.into().replace('-', "_");

    let mut builder = Builder::new();
    builder
        .filter(Some(&crate_name), LevelFilter::Trace)
        .filter(Some("briefly"), LevelFilter::Debug)
        .format(move |f, rec| {
            let now = humantime::format_rfc3339_millis(std::time::SystemTime::now());
            let module = rec.module_path().unwrap_or("<unknown>");
            let line = rec.line().unwrap_or(u32::MIN);
            let level = rec.level();

            writeln!(
                f,
                "[{} {} {} {}:{}] {}",
                level,
                crate_name,
                now,
                module,
                line,
                rec.args()
            )
        });
    builder
}

pub fn init_logger(name: impl Into<String>) {
    // RUST_LOG is parsed last so its directives override the defaults
    logger_builder(name).parse_default_env().init();
}
