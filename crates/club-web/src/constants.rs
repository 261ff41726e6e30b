// DOM hooks and web-side tuning constants

pub const CANVAS_ID: &str = "club-canvas";
pub const OVERLAY_ID: &str = "overlay";
pub const OVERLAY_HIDDEN_CLASS: &str = "hidden";
pub const FALLBACK_BUTTON_LABEL: &str = "\u{1F50A} START AUDIO";
pub const FALLBACK_BUTTON_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "10px"),
    ("left", "10px"),
    ("z-index", "9999"),
    ("padding", "10px 20px"),
    ("background", "#00ffff"),
    ("border", "none"),
    ("cursor", "pointer"),
];

// Query parameter that starts audio without the overlay click
pub const DEBUG_PARAM: &str = "debug";

// Desktop pointer drives this controller slot
pub const POINTER_SLOT: usize = 0;

// Starfield backdrop: a cube of points around the club
pub const STAR_COUNT: usize = 5000;
pub const STAR_SPREAD: f32 = 100.0;
pub const STAR_SIZE: f32 = 0.05;
pub const STAR_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const STAR_OPACITY: f32 = 0.8;
pub const STAR_SEED: u64 = 0x57A2_F1E1;

// Exponential fog towards the backdrop colour
pub const FOG_DENSITY: f32 = 0.02;

// Environment materials (sRGB)
pub const MATERIAL_BLACK: [f32; 3] = [0.067, 0.067, 0.067]; // 0x111111
pub const MATERIAL_METAL: [f32; 3] = [0.533, 0.533, 0.533]; // 0x888888

// Pointer beam drawn from tracked controllers
pub const BEAM_RADIUS: f32 = 0.005;
pub const BEAM_OPACITY: f32 = 0.9;
pub const MARKER_LIFT: f32 = 0.01; // keeps the ring above the floor overlay

// Geometry tessellation
pub const CYLINDER_SEGMENTS: u32 = 32;

// Instance buffer capacity for the additive pass (lasers + marker + beams)
pub const MAX_GLOW_INSTANCES: usize = 16;
