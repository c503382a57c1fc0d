use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::FlycamError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared WGSL modules are registered at construction time. Consuming shaders
/// use `#import flycam::module_name::Item` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping a WGSL re-parse in
/// wgpu.
pub struct ShaderComposer {
    composer: Composer,
}

struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const SHARED_MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/camera.wgsl"),
    file_path: "modules/camera.wgsl",
}];

/// Textured, instanced cube shader.
pub const TEXTURED_CUBE_SHADER: &str =
    include_str!("../../assets/shaders/raster/textured_cube.wgsl");

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, FlycamError> {
        let mut composer = Composer::default();
        for m in SHARED_MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    FlycamError::Shader(format!(
                        "failed to register shader module '{}': {e:?}",
                        m.file_path
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`FlycamError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, FlycamError> {
        let naga_module =
            self.compose_naga(source, file_path).map_err(|e| {
                FlycamError::Shader(format!(
                    "failed to compose shader '{file_path}': {e}"
                ))
            })?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns the composer error if the source or one of its imports is
    /// invalid.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, Box<naga_oil::compose::ComposerError>> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textured_cube_shader_composes() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(TEXTURED_CUBE_SHADER, "textured_cube.wgsl")
            .unwrap_or_else(|e| panic!("textured_cube.wgsl failed: {e}"));
        let entry_points: Vec<_> =
            module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn missing_import_is_reported() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import flycam::nowhere::Thing\n\
                      @fragment fn fs_main() -> @location(0) vec4<f32> \
                      { return vec4<f32>(1.0); }";
        assert!(composer.compose_naga(source, "broken.wgsl").is_err());
    }
}
