use glam::Vec3;

// Shared visual/audio tuning constants used by the core and the web frontend.

// Audio analysis
pub const DEFAULT_STREAM_URL: &str = "https://supersoul.site:8000/OSS-320";
pub const DEFAULT_FFT_SIZE: u32 = 2048;
pub const MIN_FFT_SIZE: u32 = 32; // WebAudio AnalyserNode limits
pub const MAX_FFT_SIZE: u32 = 32768;
pub const MAX_BYTE_MAGNITUDE: f32 = 255.0;

// Scene defaults
pub const DEFAULT_PLATFORM_SIZE: f32 = 20.0;
pub const DEFAULT_AMBIENT_INTENSITY: f32 = 0.2;
pub const DEFAULT_SPOTLIGHT_INTENSITY: f32 = 2.0;
pub const PLATFORM_THICKNESS: f32 = 0.2; // top face sits at y = 0
pub const BACKGROUND_COLOR: [f32; 3] = [0.020, 0.020, 0.063]; // 0x050510

// Floor pulse
pub const FLOOR_OVERLAY_HEIGHT: f32 = 0.05; // slightly above the platform
pub const FLOOR_COLOR: [f32; 3] = [0.0, 1.0, 1.0];
pub const FLOOR_GRID_DIVISIONS: f32 = 20.0;
pub const FLOOR_GRID_LINE_EDGE: f32 = 0.98;
pub const FLOOR_PULSE_SPEED: f32 = 2.0;
pub const FLOOR_PULSE_WAVENUMBER: f32 = 10.0;
pub const FLOOR_ALPHA_BASE: f32 = 0.3;
pub const FLOOR_ALPHA_PULSE: f32 = 0.3;
pub const FLOOR_ALPHA_AUDIO: f32 = 0.5;
pub const FLOOR_FADE_START: f32 = 0.3;
pub const FLOOR_FADE_END: f32 = 0.5;

// Particle field
pub const PARTICLE_COUNT: usize = 100;
pub const PARTICLE_MAX_HEIGHT: f32 = 10.0;
pub const PARTICLE_SPIN_PER_FRAME: f32 = 0.001; // radians
pub const PARTICLE_COLOR: [f32; 3] = [0.667, 0.0, 0.667]; // 0xaa00aa
pub const PARTICLE_OPACITY: f32 = 0.6;
pub const PARTICLE_SIZE: f32 = 0.1;
pub const PARTICLE_SEED: u64 = 0x5EED_C1B5;

// Laser array
pub const LASER_COUNT: usize = 4;
pub const LASER_EMITTER: Vec3 = Vec3::new(0.0, 8.0, -8.0); // above the DJ booth
pub const LASER_LENGTH: f32 = 50.0;
pub const LASER_RADIUS: f32 = 0.02;
pub const LASER_COLOR: [f32; 3] = [0.0, 1.0, 0.0];
pub const LASER_SWEEP_YAW: f32 = 0.5;
pub const LASER_SWEEP_ROLL: f32 = 0.2;
pub const LASER_FLICKER_RATE: f32 = 10.0;
pub const LASER_OPACITY_HIGH: f32 = 0.8;
pub const LASER_OPACITY_LOW: f32 = 0.1;

// Locomotion
pub const CONTROLLER_SLOTS: usize = 2;
pub const FLOOR_NORMAL_MIN_Y: f32 = 0.5; // anything flatter than ~60 degrees is walkable
pub const CONTROLLER_FORWARD: Vec3 = Vec3::NEG_Z;
pub const BEAM_LENGTH: f32 = 5.0;
pub const MARKER_INNER_RADIUS: f32 = 0.2;
pub const MARKER_OUTER_RADIUS: f32 = 0.3;
pub const MARKER_SEGMENTS: u32 = 32;
pub const MARKER_COLOR: [f32; 3] = [0.0, 1.0, 1.0];

// Desktop camera (non-XR view), relative to the rig
pub const DESKTOP_EYE_OFFSET: Vec3 = Vec3::new(0.0, 1.6, 5.0);
pub const DESKTOP_LOOK_OFFSET: Vec3 = Vec3::new(0.0, 1.6, 0.0);
pub const ORBIT_ROTATE_SPEED: f32 = 0.005; // radians per CSS pixel of drag
pub const ORBIT_ZOOM_SPEED: f32 = 0.001; // fractional distance change per wheel unit
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 40.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.5; // just short of straight up/down
pub const CAMERA_FOV_DEG: f32 = 70.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Lighting
pub const AMBIENT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const KEY_LIGHT_COLOR: [f32; 3] = [0.667, 0.8, 1.0]; // 0xaaccff
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);
pub const STAGE_SPOT_COLOR: [f32; 3] = [1.0, 0.0, 1.0];
pub const STAGE_SPOT_POSITION: Vec3 = Vec3::new(0.0, 10.0, -5.0);
pub const STAGE_SPOT_ANGLE: f32 = std::f32::consts::PI / 6.0;

// DJ booth and speaker stacks
pub const DJ_BOOTH_Z: f32 = -8.0;
pub const SPEAKER_STACK_X: f32 = 6.0;
pub const SPEAKER_STACK_YAW: f32 = 0.5; // angled towards the centre
pub const SPEAKER_CABINET_SIZE: f32 = 1.5;
pub const SPEAKER_CONE_RADIUS: f32 = 0.6;
pub const SPEAKER_CONE_INSET: f32 = 0.76; // just proud of the cabinet front
pub const DJ_PILLAR_X: f32 = 1.8;
pub const DJ_PILLAR_RADIUS: f32 = 0.1;

// Floor grid drawn over the platform
pub const GRID_DIVISIONS: usize = 40;
pub const GRID_HEIGHT: f32 = 0.01;
pub const GRID_CENTER_COLOR: [f32; 3] = [0.0, 1.0, 1.0]; // 0x00ffff
pub const GRID_LINE_COLOR: [f32; 3] = [0.267, 0.267, 0.267]; // 0x444444
