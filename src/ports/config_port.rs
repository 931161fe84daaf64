//! Configuration access port trait.

pub trait ConfigPort {
    /// Raw value, `None` when the section or key is absent. Typed parsing and
    /// validation happen in the caller so malformed values can be reported.
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// Comma-separated value split into trimmed, non-empty items.
    fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        self.get_string(section, key).map(|raw| {
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
    }
}
