//! Loading templates and partials from the filesystem.

use std::fs;
use std::path::Path;

use crate::{Engine, Error, Result};

impl Engine {
    /// Compile and store every file matching the given glob patterns.
    ///
    /// Each template is named after its file name without the directory or
    /// extension, e.g. `templates/index.mustache` is stored as `index`.
    /// Every pattern must match at least one file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let mut engine = whisker::Engine::new();
    /// engine.add_templates_glob(["templates/*.mustache"])?;
    /// let template = engine.get_template("index")?;
    /// # Ok::<(), whisker::Error>(())
    /// ```
    pub fn add_templates_glob<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (name, source) in read_glob(patterns)? {
            self.add_template(name, source)?;
        }
        Ok(())
    }

    /// Store every file matching the given glob patterns as a partial.
    ///
    /// Partials are named the same way as in
    /// [`add_templates_glob`][Engine::add_templates_glob].
    pub fn add_partials_glob<I, S>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (name, source) in read_glob(patterns)? {
            self.add_partial(name, source)?;
        }
        Ok(())
    }
}

/// Reads every file matching the patterns, returning the name and contents.
fn read_glob<I, S>(patterns: I) -> Result<Vec<(String, String)>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let before = paths.len();
        for entry in glob::glob(pattern)? {
            let path = entry?;
            if path.is_file() {
                paths.push(path);
            }
        }
        if paths.len() == before {
            return Err(Error::pattern(format!(
                "pattern `{pattern}` did not match any files"
            )));
        }
    }

    paths
        .into_iter()
        .map(|path| {
            let name = template_name(&path)?;
            let source = fs::read_to_string(&path)
                .map_err(|err| Error::from(err).with_template_name(&path.display().to_string()))?;
            tracing::debug!(path = %path.display(), template = %name, "read template file");
            Ok((name, source))
        })
        .collect()
}

fn template_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(String::from)
        .ok_or_else(|| Error::pattern(format!("invalid file name `{}`", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_name_strips_directory_and_extension() {
        assert_eq!(
            template_name(Path::new("templates/index.mustache")).unwrap(),
            "index"
        );
        assert_eq!(
            template_name(Path::new("a/b/page.en.html")).unwrap(),
            "page.en"
        );
        assert_eq!(template_name(Path::new("README")).unwrap(), "README");
    }
}
