// Shaders bundled as string constants
pub static FLOOR_WGSL: &str = include_str!("../shaders/floor.wgsl");
pub static INSTANCED_WGSL: &str = include_str!("../shaders/instanced.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
