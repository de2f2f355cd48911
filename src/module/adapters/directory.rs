//! Module source reading JSON definitions from a directory tree.

use crate::module::{
    domain::{ModuleDefinition, ModuleEntry, ModuleName},
    ports::{ModuleListError, ModuleSource, ModuleSourceResult},
};
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tracing::debug;

/// File extension of module definitions.
pub const MODULE_EXTENSION: &str = "json";

/// Reads modules from a directory.
///
/// Each `<name>.json` file is a module and each sub-directory is a group of
/// the same shape. Dot-files and other files are ignored; groups that end up
/// empty are dropped. A missing directory holds no modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryModuleSource;

impl DirectoryModuleSource {
    /// Creates the source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ModuleSource for DirectoryModuleSource {
    fn list(&self, location: &Utf8Path) -> ModuleSourceResult<Vec<ModuleEntry>> {
        let dir = match Dir::open_ambient_dir(location, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(module_dir = %location, "module directory missing, no modules loaded");
                return Ok(Vec::new());
            }
            Err(err) => return Err(ModuleListError::new(location, err).into()),
        };
        read_entries(&dir, location)
    }
}

fn read_entries(dir: &Dir, path: &Utf8Path) -> ModuleSourceResult<Vec<ModuleEntry>> {
    let listing_error = |err| ModuleListError::new(path, err);
    let mut modules = Vec::new();

    for entry_result in dir.entries().map_err(listing_error)? {
        let entry = entry_result.map_err(listing_error)?;
        let file_name = entry.file_name().map_err(listing_error)?;
        if file_name.starts_with('.') {
            continue;
        }

        if entry.file_type().map_err(listing_error)?.is_dir() {
            let group_dir = dir.open_dir(&file_name).map_err(listing_error)?;
            let nested = read_entries(&group_dir, &path.join(&file_name))?;
            if nested.is_empty() {
                debug!(group = %file_name, "dropping empty module group");
                continue;
            }
            modules.push(ModuleEntry::Group {
                name: ModuleName::new(&file_name)?,
                entries: nested,
            });
            continue;
        }

        let file_path = Utf8Path::new(&file_name);
        let Some(stem) = file_path
            .file_stem()
            .filter(|_| file_path.extension() == Some(MODULE_EXTENSION))
        else {
            debug!(file = %file_name, "ignoring non-module file");
            continue;
        };
        let document = dir
            .read_to_string(&file_name)
            .map_err(|err| ModuleListError::new(path.join(&file_name), err))?;
        let definition = ModuleDefinition::from_json(stem, &document)?;
        debug!(module = %definition.name(), "loaded module definition");
        modules.push(ModuleEntry::Command(definition));
    }

    Ok(modules)
}
