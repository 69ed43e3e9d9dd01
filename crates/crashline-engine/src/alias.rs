use std::path::{Path, PathBuf};
use std::process::Command;

/// Token for frames under the current working directory (local code).
pub const LOCAL_TOKEN: &str = "<pwd>";
/// Token for frames under the cargo registry source cache (dependency code).
pub const CARGO_TOKEN: &str = "<cargo>";
/// Token for frames under the toolchain's standard library sources.
pub const STD_TOKEN: &str = "<std>";

/// One prefix-to-token mapping. `rank` is assignment order and breaks
/// length ties during resolution, first registered wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub prefix: PathBuf,
    pub token: String,
    pub rank: usize,
}

/// Result of resolving a path against the registry. The unaliased sentinel
/// is an empty token with the original path as suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub token: String,
    pub suffix: String,
}

/// Maps absolute path prefixes to short symbolic tokens.
///
/// Read-mostly: resolution takes `&self` and may run concurrently; callers
/// that reconfigure the registry must do so exclusively, there is no
/// internal locking. Once assigned, a prefix keeps its token for the
/// lifetime of the registry unless explicitly re-registered.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    entries: Vec<AliasEntry>,
    auto_counter: usize,
}

impl AliasRegistry {
    /// A registry with no entries, for harnesses that register synthetic
    /// roots themselves.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry populated with the standard roots: the working directory,
    /// the cargo registry source cache, and the toolchain's rust sources.
    /// Roots that cannot be determined are skipped.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        if let Ok(cwd) = std::env::current_dir() {
            registry.register(cwd, LOCAL_TOKEN);
        }
        if let Some(cargo) = cargo_registry_root() {
            registry.register(cargo, CARGO_TOKEN);
        }
        if let Some(std_root) = rust_src_root() {
            registry.register(std_root, STD_TOKEN);
        }
        registry
    }

    /// Insert a prefix-to-token mapping, or replace the token of an already
    /// registered prefix in place (its rank is kept).
    pub fn register(&mut self, prefix: impl Into<PathBuf>, token: impl Into<String>) {
        let prefix = prefix.into();
        let token = token.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.prefix == prefix) {
            entry.token = token;
            return;
        }
        let rank = self.entries.len();
        self.entries.push(AliasEntry {
            prefix,
            token,
            rank,
        });
    }

    /// Register a prefix under the next numbered fallback token (`<p0>`,
    /// `<p1>`, ...). Returns the token; an already registered prefix keeps
    /// the token it has.
    pub fn register_auto(&mut self, prefix: impl Into<PathBuf>) -> String {
        let prefix = prefix.into();
        if let Some(entry) = self.entries.iter().find(|e| e.prefix == prefix) {
            return entry.token.clone();
        }
        let token = format!("<p{}>", self.auto_counter);
        self.auto_counter += 1;
        self.register(prefix, token.clone());
        token
    }

    /// Resolve `path` against the longest registered ancestor prefix.
    /// Matching is component-wise, so `/foo` never matches `/foobar/x`.
    pub fn resolve(&self, path: &str) -> Resolved {
        let p = Path::new(path);
        let best = self
            .entries
            .iter()
            .filter(|e| p.starts_with(&e.prefix))
            .max_by(|a, b| {
                let len_a = a.prefix.as_os_str().len();
                let len_b = b.prefix.as_os_str().len();
                // longest prefix first, then earliest rank
                len_a.cmp(&len_b).then(b.rank.cmp(&a.rank))
            });
        match best {
            Some(entry) => {
                let suffix = p
                    .strip_prefix(&entry.prefix)
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|_| path.to_string());
                Resolved {
                    token: entry.token.clone(),
                    suffix,
                }
            }
            None => Resolved {
                token: String::new(),
                suffix: path.to_string(),
            },
        }
    }

    /// First-registered prefix carrying `token`, used by the reverse parser
    /// to rebuild absolute locations.
    pub fn prefix_for(&self, token: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.prefix.as_path())
    }

    /// Entries in registration order, for the alias preamble.
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }
}

fn cargo_registry_root() -> Option<PathBuf> {
    if let Ok(cargo_home) = std::env::var("CARGO_HOME") {
        return Some(PathBuf::from(cargo_home).join("registry").join("src"));
    }
    dirs::home_dir().map(|home| home.join(".cargo").join("registry").join("src"))
}

fn rust_src_root() -> Option<PathBuf> {
    if let Ok(src_path) = std::env::var("RUST_SRC_PATH") {
        return Some(PathBuf::from(src_path));
    }
    let output = Command::new("rustc")
        .args(["--print", "sysroot"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let sysroot = String::from_utf8_lossy(&output.stdout);
    let root = Path::new(sysroot.trim())
        .join("lib")
        .join("rustlib")
        .join("src")
        .join("rust")
        .join("library");
    if root.is_dir() { Some(root) } else { None }
}
