//! Lookup of the HTML document template and default stylesheet.
//!
//! Both resources resolve through an ordered [`ResourceChain`]:
//!
//! 1. a caller-supplied file ([`Resolver::CustomFile`]),
//! 2. a file next to the running executable ([`Resolver::ExeDir`]),
//! 3. the copy compiled into the library ([`Resolver::BuiltIn`]).
//!
//! A resolver that finds nothing hands over to the next one. A file that
//! exists but cannot be read is an error, not a miss. The built-in resolver
//! always succeeds, so a chain ending in it never comes back empty.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::options::HtmlOptions;

/// Built-in document template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/table.html.j2");
/// Built-in default stylesheet.
pub const DEFAULT_CSS: &str = include_str!("../templates/table.css");

/// The two resources the HTML renderer needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Template,
    Stylesheet,
}

impl ResourceKind {
    /// Location relative to the executable's directory.
    pub fn exe_relative_path(self) -> &'static str {
        match self {
            ResourceKind::Template => "tmpl/reportgrid.tmpl",
            ResourceKind::Stylesheet => "reportgrid.css",
        }
    }

    pub fn builtin(self) -> &'static str {
        match self {
            ResourceKind::Template => DEFAULT_TEMPLATE,
            ResourceKind::Stylesheet => DEFAULT_CSS,
        }
    }

    fn custom_path(self, options: &HtmlOptions) -> Option<&Path> {
        match self {
            ResourceKind::Template => options.template_path.as_deref(),
            ResourceKind::Stylesheet => options.css_path.as_deref(),
        }
    }
}

/// Where a resolved resource came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceOrigin {
    File(PathBuf),
    BuiltIn,
}

/// A resolved resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub origin: ResourceOrigin,
    pub content: String,
}

/// One step of the lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolver {
    /// An explicit file path.
    CustomFile(PathBuf),
    /// A directory searched for [`ResourceKind::exe_relative_path`].
    ExeDir(PathBuf),
    BuiltIn,
}

impl Resolver {
    /// Resolves `kind`, or `Ok(None)` when this step has nothing.
    pub fn resolve(&self, kind: ResourceKind) -> Result<Option<Resource>, RenderError> {
        match self {
            Resolver::CustomFile(path) => read_if_present(path),
            Resolver::ExeDir(dir) => read_if_present(&dir.join(kind.exe_relative_path())),
            Resolver::BuiltIn => Ok(Some(Resource {
                origin: ResourceOrigin::BuiltIn,
                content: kind.builtin().to_string(),
            })),
        }
    }
}

fn read_if_present(path: &Path) -> Result<Option<Resource>, RenderError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| RenderError::Resource {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(Resource {
        origin: ResourceOrigin::File(path.to_path_buf()),
        content,
    }))
}

/// Ordered resolvers for one resource kind.
#[derive(Clone, Debug)]
pub struct ResourceChain {
    kind: ResourceKind,
    resolvers: Vec<Resolver>,
}

impl ResourceChain {
    /// A chain with exactly the given resolvers.
    pub fn from_resolvers(kind: ResourceKind, resolvers: Vec<Resolver>) -> Self {
        ResourceChain { kind, resolvers }
    }

    /// The standard chain for `kind` under `options`.
    pub fn for_options(kind: ResourceKind, options: &HtmlOptions) -> Result<Self, RenderError> {
        let mut resolvers = Vec::with_capacity(3);
        if let Some(path) = kind.custom_path(options) {
            resolvers.push(Resolver::CustomFile(path.to_path_buf()));
        }
        if options.search_exe_dir {
            resolvers.push(Resolver::ExeDir(executable_dir()?));
        }
        resolvers.push(Resolver::BuiltIn);
        Ok(Self::from_resolvers(kind, resolvers))
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    /// Tries each resolver in order and returns the first hit.
    pub fn resolve(&self) -> Result<Resource, RenderError> {
        for resolver in &self.resolvers {
            match resolver.resolve(self.kind) {
                Ok(Some(resource)) => {
                    tracing::debug!(kind = ?self.kind, origin = ?resource.origin, "resolved resource");
                    return Ok(resource);
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::error!(kind = ?self.kind, error = %err, "resource lookup failed");
                    return Err(err);
                }
            }
        }
        // Only reachable for chains built without a BuiltIn step.
        Ok(Resource {
            origin: ResourceOrigin::BuiltIn,
            content: self.kind.builtin().to_string(),
        })
    }
}

/// Directory of the running executable.
pub fn executable_dir() -> Result<PathBuf, RenderError> {
    let exe = std::env::current_exe().map_err(|e| {
        tracing::error!(error = %e, "cannot locate executable");
        RenderError::Resource {
            path: PathBuf::new(),
            message: format!("cannot locate executable: {}", e),
        }
    })?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        tracing::error!(path = %exe.display(), "executable has no parent directory");
        RenderError::Resource {
            path: exe.clone(),
            message: "executable has no parent directory".to_string(),
        }
    })
}
