/// Shader trait and shader descriptor

/// Descriptor for loading a shader program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderDesc {
    /// Cache name; two descriptors with the same name refer to the same program
    pub name: String,
    pub vertex_path: String,
    pub fragment_path: String,
    /// Preprocessor defines (e.g. `ALPHA_BLEND`)
    pub defines: Vec<String>,
}

impl ShaderDesc {
    pub fn new(name: &str, vertex_path: &str, fragment_path: &str) -> Self {
        Self {
            name: name.to_string(),
            vertex_path: vertex_path.to_string(),
            fragment_path: fragment_path.to_string(),
            defines: Vec::new(),
        }
    }

    /// Add a preprocessor define
    pub fn with_define(mut self, define: &str) -> Self {
        self.defines.push(define.to_string());
        self
    }
}

/// Compiled shader program
pub trait Shader: Send + Sync {
    /// Name the shader was loaded under
    fn name(&self) -> &str;

    /// False when compilation or linking failed
    fn is_valid(&self) -> bool {
        true
    }
}
