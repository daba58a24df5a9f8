// Theme descriptor and installer-script emission.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ThemeInfo;

/// Writes `index.theme` and `cursor.theme` at the root of an X11 theme
/// tree. Downstream tools are picky about trailing blank lines, so
/// neither file ends with one.
pub fn write_x11_theme(theme_dir: &Path, info: &ThemeInfo) -> Result<()> {
    let index = format!(
        "[Icon Theme]\nName={}\nComment={}\nInherits=\"hicolor\"",
        info.name, info.comment
    );
    fs::write(theme_dir.join("index.theme"), index)
        .with_context(|| format!("write index.theme in '{}'", theme_dir.display()))?;

    let cursor = format!(
        "[Icon Theme]\nName={}\nInherits=\"{}\"",
        info.name, info.name
    );
    fs::write(theme_dir.join("cursor.theme"), cursor)
        .with_context(|| format!("write cursor.theme in '{}'", theme_dir.display()))?;

    Ok(())
}

/// Writes the `install.inf` scheme installer next to the built Windows
/// cursors. `artifacts` pairs each scheme role name with its built
/// file name, e.g. `("Default", "Default.cur")`.
pub fn write_install_inf(
    theme_dir: &Path,
    info: &ThemeInfo,
    artifacts: &[(String, String)],
) -> Result<()> {
    let mut files = String::new();
    let mut strings = String::new();
    let mut scheme_refs = String::new();

    for (name, file) in artifacts {
        files.push_str(&format!("\"{file}\"\n"));
        strings.push_str(&format!("{name} = \"{file}\"\n"));
        if !scheme_refs.is_empty() {
            scheme_refs.push(',');
        }
        scheme_refs.push_str(&format!("%10%\\%CUR_DIR%\\%{name}%"));
    }

    let content = format!(
        "; {comment}\n\
         ; {url}\n\
         \n\
         [Version]\n\
         signature=\"$CHICAGO$\"\n\
         \n\
         [DefaultInstall]\n\
         CopyFiles = Scheme.Cur\n\
         AddReg    = Scheme.Reg\n\
         \n\
         [DestinationDirs]\n\
         Scheme.Cur = 10,\"%CUR_DIR%\"\n\
         \n\
         [Scheme.Reg]\n\
         HKCU,\"Control Panel\\Cursors\\Schemes\",\"%SCHEME_NAME%\",,\"{refs}\"\n\
         \n\
         [Scheme.Cur]\n\
         {files}\n\
         [Strings]\n\
         CUR_DIR       = \"Cursors\\{name}\"\n\
         SCHEME_NAME   = \"{name} Cursors\"\n\
         {strings}",
        comment = info.comment,
        url = info.url,
        refs = scheme_refs,
        files = files,
        name = info.name,
        strings = strings,
    );

    fs::write(theme_dir.join("install.inf"), content)
        .with_context(|| format!("write install.inf in '{}'", theme_dir.display()))?;

    Ok(())
}

/// Writes the `uninstall.bat` counterpart that removes the installed
/// scheme's registry entry again.
pub fn write_uninstall_bat(theme_dir: &Path, info: &ThemeInfo) -> Result<()> {
    let content = format!(
        "@echo off\n\
         :: Deletes the \"{name} Cursors\" scheme from the registry\n\
         REG DELETE \"HKCU\\Control Panel\\Cursors\\Schemes\" /v \"{name} Cursors\" /f",
        name = info.name,
    );

    fs::write(theme_dir.join("uninstall.bat"), content)
        .with_context(|| format!("write uninstall.bat in '{}'", theme_dir.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn info() -> ThemeInfo {
        ThemeInfo::new("test", "nobody", Some("testing".into()), None)
    }

    #[test]
    fn x11_descriptors_match_the_expected_layout() {
        let dir = tempdir().unwrap();
        write_x11_theme(dir.path(), &info()).unwrap();

        let index = fs::read_to_string(dir.path().join("index.theme")).unwrap();
        assert_eq!(
            index,
            "[Icon Theme]\nName=test\nComment=testing\nInherits=\"hicolor\""
        );

        let cursor = fs::read_to_string(dir.path().join("cursor.theme")).unwrap();
        assert_eq!(cursor, "[Icon Theme]\nName=test\nInherits=\"test\"");
    }

    #[test]
    fn install_inf_lists_every_artifact() {
        let dir = tempdir().unwrap();
        let artifacts = vec![
            ("Default".to_string(), "Default.cur".to_string()),
            ("Busy".to_string(), "Busy.ani".to_string()),
        ];
        write_install_inf(dir.path(), &info(), &artifacts).unwrap();

        let inf = fs::read_to_string(dir.path().join("install.inf")).unwrap();
        assert!(inf.contains("\"Default.cur\""));
        assert!(inf.contains("Busy = \"Busy.ani\""));
        assert!(inf.contains("SCHEME_NAME   = \"test Cursors\""));
    }

    #[test]
    fn uninstall_script_targets_the_scheme_registry_entry() {
        let dir = tempdir().unwrap();
        write_uninstall_bat(dir.path(), &info()).unwrap();

        let bat = fs::read_to_string(dir.path().join("uninstall.bat")).unwrap();
        assert!(bat.contains("test Cursors"));
        assert!(bat.contains("REG DELETE \"HKCU\\Control Panel\\Cursors\\Schemes\""));
    }
}
