/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! RON config loading. Configs are plain serde structs. Files are looked up in a `configs/` directory
//! below a given base dir, falling back to the base dir itself

use std::{fs, path::{Path,PathBuf}};
use serde::de::DeserializeOwned;

use crate::errors::{config_not_found, Result};
use crate::debug;

pub const CONFIGS: &'static str = "configs";

/// find `filename` in `<base>/configs/` or `<base>/`. Absolute filenames are returned as-is if they exist
pub fn find_config_file (base: impl AsRef<Path>, filename: &str) -> Option<PathBuf> {
    let path = Path::new(filename);
    if path.is_absolute() {
        return if path.is_file() { Some(path.to_path_buf()) } else { None }
    }

    let base = base.as_ref();
    [ base.join(CONFIGS).join(filename), base.join(filename) ].into_iter().find( |p| p.is_file())
}

/// deserialize a config from a RON file
pub fn load_config<C> (path: impl AsRef<Path>) -> Result<C> where C: DeserializeOwned {
    let path = path.as_ref();
    if !path.is_file() {
        return Err( config_not_found( path.display()))
    }

    debug!("loading config {:?}", path);
    let src = fs::read_to_string(path)?;
    config_from_str( &src)
}

/// deserialize a config from RON source
pub fn config_from_str<C> (src: &str) -> Result<C> where C: DeserializeOwned {
    Ok( ron::from_str( src)? )
}

/// look up `filename` (see [`find_config_file`]) and deserialize it
pub fn find_and_load_config<C> (base: impl AsRef<Path>, filename: &str) -> Result<C> where C: DeserializeOwned {
    match find_config_file( base, filename) {
        Some(path) => load_config( path),
        None => Err( config_not_found( filename))
    }
}
