pub mod tilemap;
