//! Keeps `tests/unit` in step with `src`
//!
//! Every source file and directory under `src` has a namesake under
//! `tests/unit`, and every namesake still points at live source. Crate
//! roots and `mod.rs` files only wire modules together and are exempt.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    /// Files that only declare modules and carry no logic of their own
    fn is_wiring(relative: &str) -> bool {
        let file_name = relative.rsplit('/').next().unwrap_or(relative);
        matches!(file_name, "main.rs" | "lib.rs" | "mod.rs")
    }

    /// Rust files and directories below `root`, relative to it, `/`-separated
    fn tree(root: &str) -> BTreeSet<String> {
        let root = Path::new(root);
        let mut found = BTreeSet::new();
        walk(root, root, &mut found)
            .unwrap_or_else(|error| panic!("cannot scan {}: {error}", root.display()));
        found
    }

    fn walk(dir: &Path, root: &Path, found: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(root)
                .map_err(io::Error::other)?
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if path.is_dir() {
                walk(&path, root, found)?;
                found.insert(relative);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.insert(relative);
            }
        }
        Ok(())
    }

    fn report(header: &str, entries: &[&String]) -> String {
        let lines: Vec<String> = entries.iter().map(|entry| format!("  - {entry}")).collect();
        format!("{header}:\n{}", lines.join("\n"))
    }

    // Tests each source file has a unit test file at the same relative path
    // Verified by adding a source file without tests
    #[test]
    fn test_sources_have_unit_tests() {
        let unit = tree(UNIT_ROOT);
        let src = tree(SRC_ROOT);
        let untested: Vec<&String> = src
            .iter()
            .filter(|path| !is_wiring(path) && !unit.contains(*path))
            .collect();

        assert!(
            untested.is_empty(),
            "{}",
            report("src entries without a tests/unit counterpart", &untested)
        );
    }

    // Tests unit test files are removed along with their source
    // Verified by adding a unit test file for a missing module
    #[test]
    fn test_unit_tests_have_sources() {
        let src = tree(SRC_ROOT);
        let unit = tree(UNIT_ROOT);
        let stale: Vec<&String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .collect();

        assert!(
            stale.is_empty(),
            "{}",
            report("tests/unit entries without a src counterpart", &stale)
        );
    }

    // Tests every test file outside module wiring declares a test
    // Verified by emptying a unit test module
    #[test]
    fn test_test_files_declare_tests() {
        let mut empty = Vec::new();
        for relative in tree("tests") {
            if !relative.ends_with(".rs") || is_wiring(&relative) {
                continue;
            }
            let path = Path::new("tests").join(&relative);
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|error| panic!("cannot read {}: {error}", path.display()));
            if !content.contains("#[test]") {
                empty.push(relative);
            }
        }
        let empty: Vec<&String> = empty.iter().collect();

        assert!(
            empty.is_empty(),
            "{}",
            report("test files without any #[test] function", &empty)
        );
    }
}
