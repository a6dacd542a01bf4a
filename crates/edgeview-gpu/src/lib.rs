//! EdgeView GPU - pushing processed frames into display textures
//!
//! The [`TextureUploader`] decides between a full (re)allocation and an
//! in-place update; a [`TextureBackend`] carries out the actual calls.
//! Two backends ship here: [`HeadlessBackend`] keeps textures in CPU memory
//! and records every call, [`WgpuBackend`] drives real GPU textures.

pub mod context;
pub mod headless;
pub mod texture;
pub mod uploader;
pub mod wgpu_backend;

pub use context::GpuContext;
pub use headless::{HeadlessBackend, TextureCall};
pub use texture::GpuTexture;
pub use uploader::{TextureBackend, TextureHandle, TextureUploader, UploadOutcome};
pub use wgpu_backend::WgpuBackend;
