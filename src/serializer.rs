use std::fmt;

use crate::Ini;

/// Render `ini` in canonical form: sections sorted by name, keys sorted within each
/// section, one `key=value` per line.
#[must_use]
pub fn serialize(ini: &Ini) -> String {
    let mut text = String::with_capacity(256);
    // Writing into a `String` cannot fail.
    _ = write_canonical(ini, &mut text);
    text
}

pub fn write_canonical<W>(ini: &Ini, out: &mut W) -> fmt::Result
where
    W: fmt::Write,
{
    let mut names = ini.section_names().collect::<Vec<&str>>();
    names.sort_unstable();

    for name in names {
        writeln!(out, "[{name}]")?;

        let Some(section) = ini.section(name) else {
            continue;
        };
        let mut entries = section.iter().collect::<Vec<(&str, &str)>>();
        entries.sort_unstable_by_key(|&(key, _)| key);

        for (key, value) in entries {
            writeln!(out, "{key}={value}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document() {
        assert_eq!(serialize(&Ini::new()), "");
    }

    #[test]
    fn sorted_sections_and_keys() {
        let mut ini = Ini::new();
        ini.set("package version", "version", "v1.0.0");
        ini.set("package name", "name", "ini parser");
        ini.set("package name", "file path", "/pkg/ini.go = hello");
        ini.set("empty", "", "");

        assert_eq!(
            serialize(&ini),
            "[empty]\n\
             =\n\
             [package name]\n\
             file path=/pkg/ini.go = hello\n\
             name=ini parser\n\
             [package version]\n\
             version=v1.0.0\n"
        );
    }

    #[test]
    fn section_without_keys() {
        let ini = Ini::parse("[b]\n[a]\nk=v\n").expect("failed to parse hardcoded INI text");

        assert_eq!(serialize(&ini), "[a]\nk=v\n[b]\n");
    }

    #[test]
    fn display_matches_serialize() {
        let ini = Ini::parse("[s]\nb=2\na=1\n").expect("failed to parse hardcoded INI text");

        assert_eq!(ini.to_string(), serialize(&ini));
    }
}
