use super::{AssetResolver, ManualSheet, SheetSource};
use crate::error::{RepoError, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ICON_DIR: &str = "Icons";
pub const BLANK_ICON: &str = "blank.png";

/// File-based assets.
///
/// Directory listings are read once by [`DirAssets::open`]; resolution afterwards is
/// pure lookup over that snapshot.
pub struct DirAssets {
    root: PathBuf,
    sources: Vec<ListedSource>,
    icons: HashSet<String>,
}

struct ListedSource {
    source: SheetSource,
    // File names, sorted
    files: Vec<String>,
}

impl DirAssets {
    pub fn open<P: AsRef<Path>>(root: P, sources: &[SheetSource]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        let mut listed = Vec::with_capacity(sources.len());
        for source in sources {
            let files = list_files(&root.join(&source.dir))?
                .into_iter()
                .filter(|f| has_extension(f, &source.extension))
                .collect::<Vec<_>>();
            debug!(dir = %source.dir, files = files.len(), "listed sheet source");
            listed.push(ListedSource {
                source: source.clone(),
                files,
            });
        }

        let icons = list_files(&root.join(ICON_DIR))?.into_iter().collect();

        Ok(Self {
            root,
            sources: listed,
            icons,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetResolver for DirAssets {
    fn manual_sheets(&self, name: &str, excluded: &[&str]) -> Result<Vec<ManualSheet>> {
        let mut sheets = Vec::new();
        for listed in &self.sources {
            for file in &listed.files {
                let stem = strip_extension(file, &listed.source.extension);
                if !stem.starts_with(name) || excluded.iter().any(|ex| stem.starts_with(ex)) {
                    continue;
                }
                sheets.push(ManualSheet::new(
                    listed.source.icon.clone(),
                    format!("{}/{}", listed.source.dir, encode_path_segment(file)),
                ));
            }
        }
        Ok(sheets)
    }

    fn module_icon(&self, name: &str) -> String {
        let file = format!("{}.png", name);
        if self.icons.contains(&file) {
            format!("{}/{}", ICON_DIR, encode_path_segment(&file))
        } else {
            format!("{}/{}", ICON_DIR, BLANK_ICON)
        }
    }
}

/// Sorted file names in `dir`. A missing directory is logged and treated as empty.
fn list_files(dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(dir = %dir.display(), "asset directory not found");
            return Ok(Vec::new());
        }
        Err(e) => return Err(RepoError::Io(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            files.push(name.to_string());
        }
    }
    files.sort();
    Ok(files)
}

fn has_extension(file: &str, extension: &str) -> bool {
    file.len() > extension.len() + 1 && file.ends_with(&format!(".{}", extension))
}

fn strip_extension<'a>(file: &'a str, extension: &str) -> &'a str {
    &file[..file.len() - extension.len() - 1]
}

/// Escapes the characters of a file name that would otherwise end or break a URL path.
fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            '?' => out.push_str("%3F"),
            '"' => out.push_str("%22"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::default_sheet_sources;
    use tempfile::TempDir;

    fn asset_root(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        dir
    }

    #[test]
    fn html_sheets_come_before_pdf_sheets() {
        let root = asset_root(&["PDF/Wires.pdf", "HTML/Wires.html"]);
        let assets = DirAssets::open(root.path(), &default_sheet_sources()).unwrap();

        let sheets = assets.manual_sheets("Wires", &[]).unwrap();
        assert_eq!(
            sheets,
            vec![
                ManualSheet::new("HTML/img/html-manual.png", "HTML/Wires.html"),
                ManualSheet::new("HTML/img/pdf-manual.png", "PDF/Wires.pdf"),
            ]
        );
    }

    #[test]
    fn sheets_of_longer_sibling_names_are_excluded() {
        let root = asset_root(&[
            "HTML/Wire.html",
            "HTML/Wire (optimized).html",
            "HTML/Wire Sequence.html",
        ]);
        let assets = DirAssets::open(root.path(), &default_sheet_sources()).unwrap();

        let sheets = assets.manual_sheets("Wire", &["Wire Sequence"]).unwrap();
        let urls: Vec<_> = sheets.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["HTML/Wire%20(optimized).html", "HTML/Wire.html"]);

        let sheets = assets.manual_sheets("Wire Sequence", &[]).unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].url, "HTML/Wire%20Sequence.html");
    }

    #[test]
    fn other_extensions_are_ignored() {
        let root = asset_root(&["HTML/Wires.html", "HTML/Wires.css", "HTML/img/x.png"]);
        let assets = DirAssets::open(root.path(), &default_sheet_sources()).unwrap();
        assert_eq!(assets.manual_sheets("Wires", &[]).unwrap().len(), 1);
    }

    #[test]
    fn missing_directories_yield_no_sheets() {
        let root = asset_root(&[]);
        let assets = DirAssets::open(root.path(), &default_sheet_sources()).unwrap();
        assert!(assets.manual_sheets("Wires", &[]).unwrap().is_empty());
    }

    #[test]
    fn module_icon_falls_back_to_blank() {
        let root = asset_root(&["Icons/Wires.png"]);
        let assets = DirAssets::open(root.path(), &[]).unwrap();
        assert_eq!(assets.module_icon("Wires"), "Icons/Wires.png");
        assert_eq!(assets.module_icon("Knob"), "Icons/blank.png");
    }

    #[test]
    fn encodes_url_breaking_characters() {
        assert_eq!(encode_path_segment("A #1?.html"), "A%20%231%3F.html");
    }
}
