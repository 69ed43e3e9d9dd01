use crashline_engine::{AliasRegistry, CARGO_TOKEN, LOCAL_TOKEN, STD_TOKEN};
use crashline_types::{CapturedError, RawFrame};

/// A synthetic registry so the demo output is identical on every machine.
pub fn sample_registry() -> AliasRegistry {
    let mut registry = AliasRegistry::empty();
    registry.register("/work/acme", LOCAL_TOKEN);
    registry.register("/home/dev/.cargo/registry/src", CARGO_TOKEN);
    registry.register("/opt/rust/lib/rustlib/src/rust/library", STD_TOKEN);
    registry
}

/// A chained failure in the shape real crash reports take: a lookup misses
/// deep in a dependency, local code wraps it with a domain error.
pub fn sample_error() -> CapturedError {
    let cause = CapturedError::new("KeyError", "'region'")
        .with_frame(
            RawFrame::new("/work/acme/src/config.rs", "load_settings", 31)
                .with_source_line("let region = raw.get(\"region\")?;"),
        )
        .with_frame(
            RawFrame::new(
                "/home/dev/.cargo/registry/src/index/settings-2.4.1/src/map.rs",
                "get",
                88,
            )
            .with_source_line("self.entries.get(key).ok_or(KeyError::new(key))"),
        );

    CapturedError::new("StartupError", "could not initialize deployment profile")
        .with_frame(
            RawFrame::new("/work/acme/src/main.rs", "main", 12)
                .with_source_line("let profile = boot::startup()?;"),
        )
        .with_frame(
            RawFrame::new("/work/acme/src/boot.rs", "startup", 57)
                .with_source_line("let settings = config::load_settings(&raw)?;"),
        )
        .caused_by(cause)
}
