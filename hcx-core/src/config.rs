// Compile-time layout parameters. All measurements in scene units (1 unit = 1 meter).
// Nothing here is read from files, flags or the environment.

use std::f32::consts::PI;

// Scene
pub const SKY_COLOR: u32 = 0x87CEEB;

// Elevation bands for coplanar ground features (anti z-fighting)
pub const GRASS_ELEVATION: f32 = 0.0;
pub const COURTYARD_ELEVATION: f32 = 0.01;
pub const SIDEWALK_ELEVATION: f32 = 0.015;
pub const ROAD_ELEVATION: f32 = 0.02;
pub const MARKING_ELEVATION: f32 = 0.03;
pub const MIN_BAND_SEPARATION: f32 = 0.005;

// Ground
pub const GROUND_SIZE: f32 = 100.0;
pub const COURTYARD_SIZE: f32 = 25.0;
pub const GRASS_COLOR: u32 = 0x4A7C59;
pub const COURTYARD_COLOR: u32 = 0xD2B48C;

// Roads
pub const MAIN_ROAD_WIDTH: f32 = 6.0;
pub const MAIN_ROAD_OFFSET: f32 = 20.0; // both main roads cross at (20, 20)
pub const CONNECTING_ROAD_WIDTH: f32 = 4.0;
pub const CONNECTING_ROAD_LENGTH: f32 = 35.0;
pub const CONNECTING_ROAD_OFFSET: f32 = 2.5;
pub const ROAD_COLOR: u32 = 0x404040;

// Centre-line markings
pub const MARKING_SPACING: f32 = 10.0;
pub const MARKING_EXTENT: f32 = 40.0; // marks run from -extent to +extent
pub const MARKING_LENGTH: f32 = 3.0;
pub const MARKING_WIDTH: f32 = 0.2;
pub const MARKING_COLOR: u32 = 0xFFFFFF;

// Sidewalks
pub const SIDEWALK_WIDTH: f32 = 2.0;
pub const SIDEWALK_OFFSET: f32 = 4.0; // distance from road centre line
pub const SIDEWALK_COLOR: u32 = 0xB0B0B0;

// Street lights
pub const STREET_LIGHT_SPACING: f32 = 20.0;
pub const STREET_LIGHT_OFFSET: f32 = 5.0; // distance from road centre line
pub const POLE_RADIUS_TOP: f32 = 0.1;
pub const POLE_RADIUS_BOTTOM: f32 = 0.15;
pub const POLE_HEIGHT: f32 = 6.0;
pub const POLE_CENTER_Y: f32 = 3.0;
pub const POLE_COLOR: u32 = 0x333333;
pub const FIXTURE_RADIUS: f32 = 0.3;
pub const FIXTURE_Y: f32 = 5.8;
pub const FIXTURE_COLOR: u32 = 0xFFFACD;
pub const FIXTURE_EMISSIVE: u32 = 0x111100;
pub const STREET_LIGHT_Y: f32 = 5.5;
pub const STREET_LIGHT_COLOR: u32 = 0xFFFACD;
pub const STREET_LIGHT_INTENSITY: f32 = 0.5;
pub const STREET_LIGHT_DISTANCE: f32 = 15.0;

// Buildings
pub const BUILDING_COLOR: u32 = 0xD2B48C;
pub const FLAT_ROOF_OVERHANG: f32 = 0.5;
pub const FLAT_ROOF_THICKNESS: f32 = 0.5;
pub const FLAT_ROOF_COLOR: u32 = 0x696969;
pub const PYRAMID_ROOF_HEIGHT: f32 = 2.0;
pub const PYRAMID_ROOF_SEGMENTS: u32 = 4;
pub const PYRAMID_ROOF_COLOR: u32 = 0x8B0000;
pub const DEFAULT_WINDOWS_PER_SIDE: i32 = 2;
pub const WINDOW_SPACING: f32 = 4.0;
pub const WINDOW_SILL_OFFSET: f32 = 0.2; // above the floor's mid-height
pub const WINDOW_FRAME_SIZE: [f32; 3] = [2.5, 2.5, 0.3];
pub const WINDOW_FRAME_OUTSET: f32 = 0.2;
pub const WINDOW_FRAME_COLOR: u32 = 0x8B4513;
pub const WINDOW_GLASS_SIZE: [f32; 3] = [2.0, 2.0, 0.2];
pub const WINDOW_GLASS_OUTSET: f32 = 0.3;
pub const WINDOW_GLASS_COLOR: u32 = 0x87CEEB;
pub const WINDOW_GLASS_OPACITY: f32 = 0.8;

// Main tower
pub const TOWER_WIDTH: f32 = 12.0;
pub const TOWER_DEPTH: f32 = 12.0;
pub const TOWER_FLOOR_HEIGHT: f32 = 3.0;
pub const TOWER_FLOORS: i32 = 10;

// Trees
pub const TREE_COUNT: i32 = 8;
pub const TREE_MIN_RADIUS: f32 = 25.0;
pub const TREE_MAX_RADIUS: f32 = 35.0;
pub const TRUNK_RADIUS_TOP: f32 = 0.2;
pub const TRUNK_RADIUS_BOTTOM: f32 = 0.3;
pub const TRUNK_HEIGHT: f32 = 3.0;
pub const TRUNK_COLOR: u32 = 0x8B4513;
pub const LEAVES_RADIUS: f32 = 2.0;
pub const LEAVES_Y: f32 = 3.5;
pub const LEAVES_COLOR: u32 = 0x228B22;

// Tessellation defaults, matching common scene-graph library defaults
pub const CYLINDER_SEGMENTS: u32 = 32;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 32;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 16;

// Lighting
pub const AMBIENT_COLOR: u32 = 0x404040;
pub const AMBIENT_INTENSITY: f32 = 0.6;
pub const SUN_COLOR: u32 = 0xFFFFFF;
pub const SUN_INTENSITY: f32 = 1.0;
pub const SUN_POSITION: [f32; 3] = [50.0, 50.0, 50.0];
pub const SHADOW_MAP_SIZE: u32 = 2048;

// Camera
pub const CAMERA_FOV: f32 = 75.0 * PI / 180.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_TARGET: [f32; 3] = [0.0, 15.0, 0.0];
pub const ORBIT_RADIUS: f32 = 35.0;
pub const ORBIT_SPEED: f32 = 0.3;
pub const BOB_BASE_HEIGHT: f32 = 15.0;
pub const BOB_AMPLITUDE: f32 = 5.0;
pub const BOB_SPEED: f32 = 0.5;
pub const FRAME_TIME_STEP: f32 = 0.01; // animation time units per frame
pub const TIME_UNITS_PER_SECOND: f32 = 0.6; // FRAME_TIME_STEP at 60 Hz
