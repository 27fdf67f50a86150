//! Language detection keyed by file extension

use std::path::Path;

/// Supported languages.
///
/// Python is analyzed over a full parse tree; the C-family languages are
/// analyzed with structural text heuristics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Python (.py)
    Python,
    /// C (.c, .h)
    C,
    /// C++ (.cpp, .cc, .cxx, .c++, .hpp, .hh, .hxx)
    Cpp,
    /// Java (.java)
    Java,
}

impl Language {
    /// Detect language from file extension (without the dot).
    ///
    /// Returns `None` if the extension is not recognized.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Language::Python),
            "c" | "h" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "c++" | "hpp" | "hh" | "hxx" => Some(Language::Cpp),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }

    /// True when a full parse tree drives analysis for this language
    pub fn has_tree_pass(&self) -> bool {
        matches!(self, Language::Python)
    }

    /// File extensions for this language (without the dot)
    pub fn extensions(&self) -> &[&'static str] {
        match self {
            Language::Python => &["py"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "c++", "hpp", "hh", "hxx"],
            Language::Java => &["java"],
        }
    }
}
