use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tri_platform::window::PlatformConfig;
use tri_render::ShaderSources;

pub const CONFIG_PATH: &str = "res/config.json";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub prefer_core_profile: bool,
    pub shader_dir: PathBuf,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub geometry_path: PathBuf,
    pub triangles_per_frame: usize,
    pub clear_color: [f64; 4],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Triangle".to_string(),
            width: 640,
            height: 480,
            prefer_core_profile: true,
            shader_dir: PathBuf::from("shader"),
            vertex_shader: "triangle_vert.wgsl".to_string(),
            fragment_shader: "triangle_frag.wgsl".to_string(),
            geometry_path: PathBuf::from("res/vertexes.txt"),
            triangles_per_frame: 2,
            clear_color: [0.3, 0.3, 1.0, 1.0],
        }
    }
}

impl GameConfig {
    pub fn platform(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
        }
    }

    pub fn shader_sources(&self) -> ShaderSources {
        ShaderSources {
            dir: self.shader_dir.clone(),
            vertex_file: self.vertex_shader.clone(),
            fragment_file: self.fragment_shader.clone(),
        }
    }
}

/// Loads the config file, or defaults if it does not exist.
pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    if !path.exists() {
        log::info!("No config at '{}', using defaults", path.display());
        return Ok(GameConfig::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.width == 0 || config.height == 0 {
        return Err(format!(
            "Config validation failed: window size {}x{} must be non-zero",
            config.width, config.height
        ));
    }
    if config.triangles_per_frame == 0 {
        return Err("Config validation failed: triangles_per_frame must be at least 1".to_string());
    }
    if config.vertex_shader.is_empty() || config.fragment_shader.is_empty() {
        return Err("Config validation failed: shader file names must not be empty".to_string());
    }
    Ok(())
}
