use std::{io, path::PathBuf};

use directories::ProjectDirs;

/// Directory holding the database file. Debug builds keep it next to the
/// workspace so development data never mixes with an installed copy.
pub fn asset_dir() -> io::Result<PathBuf> {
    let path = if cfg!(debug_assertions) {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../dev_assets")
    } else {
        ProjectDirs::from("dev", "snip", "snip")
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?
            .data_dir()
            .to_path_buf()
    };

    std::fs::create_dir_all(&path)?;
    Ok(path)
}

pub fn default_database_url() -> io::Result<String> {
    let path = asset_dir()?.join("commands.sqlite");
    Ok(format!("sqlite://{}", path.to_string_lossy()))
}
