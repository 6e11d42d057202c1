// ZIP extraction for the ffmpeg build archive

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::{Result, TunedlError};
use crate::platform::remove_path;

/// Extract a ZIP held in memory into `dest`
pub fn extract_zip(bytes: Vec<u8>, dest: &Path) -> Result<()> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    log::debug!("Extracting {} entries into {:?}", archive.len(), dest);
    archive.extract(dest)?;
    Ok(())
}

/// Move the contents of the archive's top-level folder up into `root` and
/// remove the emptied folder.
///
/// Builds ship as `ffmpeg-master-latest-win64-gpl/bin/ffmpeg.exe`; after this
/// the binary sits at `root/bin/ffmpeg.exe` whatever the build is called.
/// Entries already present in `root` with the same name are replaced.
pub fn flatten_single_root(root: &Path) -> Result<()> {
    let nested = first_subdirectory(root)?.ok_or_else(|| {
        TunedlError::provision(format!(
            "Archive extracted into {} has no top-level folder",
            root.display()
        ))
    })?;

    // Move the folder aside first so a child sharing its name (`X/X`) can
    // take its place
    let staging = staging_path(root, &nested)?;
    log::debug!("Flattening {:?} into {:?} via {:?}", nested, root, staging);
    fs::rename(&nested, &staging)?;

    for entry in fs::read_dir(&staging)? {
        let entry = entry?;
        let target = root.join(entry.file_name());
        remove_path(&target)?;
        fs::rename(entry.path(), &target)?;
    }

    fs::remove_dir_all(&staging)?;
    Ok(())
}

fn staging_path(root: &Path, nested: &Path) -> Result<PathBuf> {
    let name = nested
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    // Free both in `root` and among the children about to move into it
    (0..100)
        .map(|i| format!(".{}.flatten{}", name, i))
        .find(|candidate| !root.join(candidate).exists() && !nested.join(candidate).exists())
        .map(|candidate| root.join(candidate))
        .ok_or_else(|| {
            TunedlError::provision(format!("No free staging name in {}", root.display()))
        })
}

fn first_subdirectory(root: &Path) -> Result<Option<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs.into_iter().next())
}
