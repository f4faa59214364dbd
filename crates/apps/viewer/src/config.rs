use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use foundation::math::Vec3;
use gpu::{OrbitControls, Viewport};
use streaming::{
    ElevationQuery, ElevationSource, FetchError, FileElevationSource, HttpElevationSource,
};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:4000";
pub const BACKEND_URL_ENV: &str = "VIEWER_BACKEND_URL";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Terrain viewer for a single elevation sample")]
pub struct Args {
    /// Elevation backend base URL (env: VIEWER_BACKEND_URL)
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Read a saved elevation response instead of calling the backend
    #[arg(long)]
    pub payload_file: Option<PathBuf>,

    /// Latitude of the point of interest, in degrees
    #[arg(long, default_value_t = 51.45523, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the point of interest, in degrees
    #[arg(long, default_value_t = -2.59665, allow_negative_numbers = true)]
    pub long: f64,

    #[arg(long, default_value_t = 14)]
    pub zoom: u8,

    /// Frames per second of the render loop
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Stop after this many frames (runs until Ctrl-C otherwise)
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Initial camera position: x,y,z
    #[arg(long, default_value = "0,-5,5", value_parser = parse_vec3, allow_hyphen_values = true)]
    pub camera: Vec3,

    /// Disable orbit controls
    #[arg(long)]
    pub no_orbit: bool,

    #[arg(long)]
    pub auto_rotate: bool,

    /// Output size: WIDTHxHEIGHT
    #[arg(long, default_value = "1280x720", value_parser = parse_viewport)]
    pub viewport: Viewport,

    /// Show the green demo cube on the placeholder floor
    #[arg(long)]
    pub demo_cube: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Query(FetchError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Query(err) => write!(f, "invalid point of interest: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Query(err) => Some(err),
        }
    }
}

/// Resolved viewer settings.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub backend_url: String,
    pub payload_file: Option<PathBuf>,
    pub query: ElevationQuery,
    pub fps: u32,
    pub max_frames: Option<u64>,
    pub camera_position: Vec3,
    pub orbit: bool,
    pub auto_rotate: bool,
    pub viewport: Viewport,
    pub demo_cube: bool,
}

impl ViewerConfig {
    /// `backend_env` is the value of `VIEWER_BACKEND_URL`, if set.
    pub fn resolve(args: Args, backend_env: Option<String>) -> Result<Self, ConfigError> {
        let query =
            ElevationQuery::new(args.lat, args.long, args.zoom).map_err(ConfigError::Query)?;
        let backend_url = args
            .backend_url
            .or(backend_env)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        Ok(Self {
            backend_url,
            payload_file: args.payload_file,
            query,
            fps: args.fps,
            max_frames: args.max_frames,
            camera_position: args.camera,
            orbit: !args.no_orbit,
            auto_rotate: args.auto_rotate,
            viewport: args.viewport,
            demo_cube: args.demo_cube,
        })
    }

    pub fn from_env(args: Args) -> Result<Self, ConfigError> {
        Self::resolve(args, env::var(BACKEND_URL_ENV).ok())
    }

    pub fn source(&self) -> Arc<dyn ElevationSource> {
        match &self.payload_file {
            Some(path) => Arc::new(FileElevationSource::new(path.clone())),
            None => Arc::new(HttpElevationSource::new(self.backend_url.clone())),
        }
    }

    pub fn controls(&self) -> Option<OrbitControls> {
        self.orbit.then(|| {
            let mut controls = OrbitControls::new();
            controls.auto_rotate = self.auto_rotate;
            controls
        })
    }
}

pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z, got {s:?}"));
    };
    let num = |p: &str| {
        p.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("not a number: {p:?}"))
    };
    Ok(Vec3::new(num(x)?, num(y)?, num(z)?))
}

pub fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let dim = |p: &str| match p.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("invalid dimension: {p:?}")),
    };
    Ok(Viewport {
        width: dim(w)?,
        height: dim(h)?,
    })
}
