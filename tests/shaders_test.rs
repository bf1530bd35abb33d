use depth_sketch::pipelines::{flat, surface::SurfaceShader};
use naga::{
    Binding, ImageClass, Module, ScalarKind, ShaderStage, TypeInner,
    back::glsl,
    valid::{Capabilities, ValidationFlags, Validator},
};

const SURFACES: [SurfaceShader; 2] = [SurfaceShader::DepthLines, SurfaceShader::DepthGradient];

fn parse(source: &str) -> Module {
    naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("invalid WGSL:\n{}", e.emit_to_string(source)))
}

/// Translate one entry point the way the WebGL backend does.
fn to_webgl_glsl(source: &str, stage: ShaderStage, entry_point: &str) -> Result<String, String> {
    let module = parse(source);
    let info = Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| format!("{e:?}"))?;
    let options = glsl::Options {
        version: glsl::Version::Embedded {
            version: 300,
            is_webgl: true,
        },
        ..Default::default()
    };
    let pipeline_options = glsl::PipelineOptions {
        shader_stage: stage,
        entry_point: entry_point.to_string(),
        multiview: None,
    };
    let mut out = String::new();
    {
        let mut writer = glsl::Writer::new(
            &mut out,
            &module,
            &info,
            &options,
            &pipeline_options,
            naga::proc::BoundsCheckPolicies::default(),
        )
        .map_err(|e| format!("{e:?}"))?;
        writer.write().map_err(|e| format!("{e:?}"))?;
    }
    Ok(out)
}

fn assert_translates(source: &str, name: &str) {
    for (stage, entry_point) in [(ShaderStage::Vertex, "vs_main"), (ShaderStage::Fragment, "fs_main")] {
        if let Err(e) = to_webgl_glsl(source, stage, entry_point) {
            panic!("{name} {entry_point} does not translate to GLSL ES 300: {e}");
        }
    }
}

#[test]
fn surface_shaders_translate_to_webgl() {
    for shader in SURFACES {
        assert_translates(shader.source(), &format!("{shader:?}"));
    }
}

#[test]
fn flat_shader_translates_to_webgl() {
    assert_translates(flat::SHADER_SOURCE, "flat");
}

#[test]
fn depth_is_bound_as_a_plain_float_texture() {
    for shader in SURFACES {
        let module = parse(shader.source());
        let (_, depth_info) = module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some("depth_info"))
            .expect("depth_info binding");
        match module.types[depth_info.ty].inner {
            TypeInner::Image { class, .. } => assert_eq!(
                class,
                ImageClass::Sampled {
                    kind: ScalarKind::Float,
                    multi: false
                },
                "{shader:?}"
            ),
            ref other => panic!("{shader:?}: depth_info is {other:?}"),
        }
    }
}

#[test]
fn surface_vertex_stage_reads_position_uv_normal_and_instance() {
    for shader in SURFACES {
        let module = parse(shader.source());
        let vs_main = module
            .entry_points
            .iter()
            .find(|ep| ep.name == "vs_main")
            .expect("vs_main");
        let mut locations: Vec<u32> = vs_main
            .function
            .arguments
            .iter()
            .flat_map(|arg| match &module.types[arg.ty].inner {
                TypeInner::Struct { members, .. } => members
                    .iter()
                    .filter_map(|member| match member.binding {
                        Some(Binding::Location { location, .. }) => Some(location),
                        _ => None,
                    })
                    .collect(),
                _ => Vec::new(),
            })
            .collect();
        locations.sort_unstable();
        // The band attribute at location 3 stays in the buffer but is not consumed.
        assert_eq!(locations, vec![0, 1, 2, 5, 6, 7, 8], "{shader:?}");
    }
}
