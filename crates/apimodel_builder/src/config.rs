//! Builder configuration.

use std::collections::BTreeMap;

/// Well-known namespaces and the prefixes they always receive.
pub const KNOWN_PREFIXES: &[(&str, &str)] = &[
    ("http://www.w3.org/2001/XMLSchema", "xs"),
    ("http://www.w3.org/2001/XMLSchema-instance", "xsi"),
    ("http://schemas.xmlsoap.org/wsdl/", "wsdl"),
    ("http://schemas.xmlsoap.org/wsdl/soap/", "soap"),
    ("http://schemas.xmlsoap.org/wsdl/soap12/", "soap12"),
    ("http://schemas.xmlsoap.org/soap/encoding/", "soapenc"),
    ("http://schemas.xmlsoap.org/wsdl/http/", "http"),
    ("http://schemas.xmlsoap.org/wsdl/mime/", "mime"),
    ("http://ws-i.org/profiles/basic/1.1/xsd", "wsi"),
    ("http://wadl.dev.java.net/2009/02", "wadl"),
    ("http://www.w3.org/XML/1998/namespace", "xml"),
];

/// Configuration for one model build.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Namespace to prefix mappings that are never generated.
    pub known_prefixes: BTreeMap<String, String>,

    /// Stem of generated prefixes (`ns` gives `ns0`, `ns1`, ...).
    pub prefix_stem: String,

    /// Package segment under which synthetic wrapper and fault bean classes live.
    pub wrapper_segment: String,

    /// Suffix of request wrapper class names.
    pub request_suffix: String,

    /// Suffix of response wrapper class names and element names.
    pub response_suffix: String,

    /// Suffix of implicit fault bean class names.
    pub fault_bean_suffix: String,

    /// Qualified name of the generic converter base type.
    pub converter_base: String,

    /// Whether collections written without a type argument classify as
    /// collections of anything (true) or abort the build (false).
    pub tolerate_raw_collections: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            known_prefixes: KNOWN_PREFIXES
                .iter()
                .map(|(ns, p)| ((*ns).to_string(), (*p).to_string()))
                .collect(),
            prefix_stem: "ns".to_string(),
            wrapper_segment: "wrappers".to_string(),
            request_suffix: String::new(),
            response_suffix: "Response".to_string(),
            fault_bean_suffix: "Bean".to_string(),
            converter_base: "core.Converter".to_string(),
            tolerate_raw_collections: true,
        }
    }
}

impl BuildConfig {
    /// Creates a configuration that rejects raw collections.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            tolerate_raw_collections: false,
            ..Self::default()
        }
    }

    /// Adds or replaces a known prefix.
    #[must_use]
    pub fn with_prefix(mut self, namespace: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.known_prefixes.insert(namespace.into(), prefix.into());
        self
    }

    /// Sets the stem of generated prefixes.
    #[must_use]
    pub fn with_prefix_stem(mut self, stem: impl Into<String>) -> Self {
        self.prefix_stem = stem.into();
        self
    }

    /// Sets the converter base type.
    #[must_use]
    pub fn with_converter_base(mut self, name: impl Into<String>) -> Self {
        self.converter_base = name.into();
        self
    }

    /// Sets the synthetic class package segment.
    #[must_use]
    pub fn with_wrapper_segment(mut self, segment: impl Into<String>) -> Self {
        self.wrapper_segment = segment.into();
        self
    }

    /// Returns the synthetic class name `<package>.<segment>.<simple><suffix>`.
    #[must_use]
    pub fn synthetic_name(&self, package: &str, simple: &str, suffix: &str) -> String {
        if package.is_empty() {
            format!("{}.{simple}{suffix}", self.wrapper_segment)
        } else {
            format!("{package}.{}.{simple}{suffix}", self.wrapper_segment)
        }
    }
}
