/**
 * Module Name Resolver
 * Applies the require.js alias tables (`map['*']`, then `paths`) to a module name
 */
use layerlint_config::EffectiveConfig;
use serde::Serialize;

/// Separator between module name segments, independent of the host platform
pub const SEGMENT_SEPARATOR: char = '/';

/// Which alias table produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionSource {
    /// Full-name replacement from `map['*']`
    Map,
    /// First segment replaced through `paths`
    Paths,
    /// No alias applied
    Identity,
}

/// Result of resolving one module name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub source: ResolutionSource,
    /// Resolved names to look for, in preference order.
    ///
    /// More than one only for `paths` fallback arrays; empty when every
    /// fallback points off-disk.
    pub names: Vec<String>,
}

/// Resolve `module_name` through the alias tables of `config`.
///
/// Priority chain (first match wins):
/// 1. `map['*'][module_name]` - the whole name is replaced, nothing else applies
/// 2. `paths[first_segment]` - only the first segment is replaced, since aliases
///    are relative to the base URL or to `/`, never to an inner directory
/// 3. the name itself
pub fn resolve_module_name(config: &EffectiveConfig, module_name: &str) -> Resolution {
    if let Some(mapped) = config.wildcard_map().get(module_name) {
        // An empty replacement does not count as a mapping
        if !mapped.is_empty() {
            log::debug!("{}: map['*'] -> {}", module_name, mapped);
            return Resolution {
                source: ResolutionSource::Map,
                names: vec![mapped.clone()],
            };
        }
    }

    let (path_root, rest) = match module_name.split_once(SEGMENT_SEPARATOR) {
        Some((root, rest)) => (root, Some(rest)),
        None => (module_name, None),
    };

    if let Some(target) = config.paths().get(path_root) {
        let names: Vec<String> = target
            .targets()
            .iter()
            .filter(|t| {
                let remote = is_remote_target(t);
                if remote {
                    log::warn!(
                        "{}: path target '{}' is not on disk, skipping it",
                        module_name,
                        t
                    );
                }
                !remote
            })
            .map(|t| match rest {
                Some(rest) => format!("{}{}{}", t, SEGMENT_SEPARATOR, rest),
                None => t.clone(),
            })
            .collect();

        log::debug!("{}: paths['{}'] -> {:?}", module_name, path_root, names);
        return Resolution {
            source: ResolutionSource::Paths,
            names,
        };
    }

    Resolution {
        source: ResolutionSource::Identity,
        names: vec![module_name.to_string()],
    }
}

/// Targets loaded over the network (`http:`, `https:`, protocol-relative `//`)
pub fn is_remote_target(target: &str) -> bool {
    target.starts_with("//") || target.starts_with("http:") || target.starts_with("https:")
}
