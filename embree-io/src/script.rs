//! Line-oriented command script: one `-flag value...` directive per line.

use embree_core::camera::Camera;
use embree_core::light::Light;
use embree_core::Scene;

use crate::markup::format_number;

/// Accumulates script directives.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    out: String,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `flag` followed by its space-joined arguments.
    pub fn directive<I, S>(&mut self, flag: &str, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.out.push_str(flag);
        for arg in args {
            self.out.push(' ');
            self.out.push_str(&arg.into());
        }
        self.out.push('\n');
        self
    }

    pub fn numbers(&mut self, flag: &str, values: &[f64]) -> &mut Self {
        self.directive(flag, values.iter().map(|v| format_number(*v)))
    }

    /// A bare flag, written only when `enabled`.
    pub fn switch(&mut self, flag: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.directive(flag, std::iter::empty::<String>());
        }
        self
    }

    /// Append directives produced elsewhere.
    pub fn append(&mut self, script: &str) -> &mut Self {
        self.out.push_str(script);
        self
    }

    pub fn finish(self) -> String {
        self.out
    }
}

pub fn write_camera(builder: &mut ScriptBuilder, camera: &Camera) {
    let view = camera.view();
    builder
        .numbers("-vp", &view.position)
        .numbers("-vi", &view.target)
        .numbers("-vu", &view.up)
        .numbers("-angle", &[view.fov]);
    if let Some(radius) = camera.lens_radius() {
        builder.numbers("-radius", &[radius]);
    }
}

/// Quote an argument that would otherwise split into several tokens.
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(char::is_whitespace) {
        format!("\"{}\"", arg)
    } else {
        arg.to_string()
    }
}

/// Directive flag and arguments for one light, fields in declaration order.
pub fn light_directive(light: &Light) -> (String, Vec<String>) {
    let flag = format!("-{}", light.tag().to_lowercase());
    let mut values: Vec<f64> = Vec::new();
    let mut text = None;
    match light {
        Light::Ambient(l) => values.extend(l.intensity),
        Light::Point(l) => {
            values.extend(l.position);
            values.extend(l.intensity);
        }
        Light::Distant(l) => {
            values.extend(l.direction);
            values.extend(l.intensity);
            values.push(l.half_angle);
        }
        Light::Triangle(l) => {
            values.extend(l.v0);
            values.extend(l.v1);
            values.extend(l.v2);
            values.extend(l.intensity);
        }
        Light::Quad(l) => {
            values.extend(l.position);
            values.extend(l.edge0);
            values.extend(l.edge1);
            values.extend(l.intensity);
        }
        Light::Hdri(l) => {
            values.extend(l.intensity);
            text = Some(quote_arg(&l.image));
        }
    }
    let mut args: Vec<String> = values.into_iter().map(format_number).collect();
    args.extend(text);
    (flag, args)
}

/// Light directives in declaration order, ambient and point lights last.
pub fn write_lights(builder: &mut ScriptBuilder, lights: &[Light]) {
    let (trailing, leading): (Vec<&Light>, Vec<&Light>) =
        lights.iter().partition(|l| l.is_trailing());
    for light in leading.into_iter().chain(trailing) {
        let (flag, args) = light_directive(light);
        builder.directive(&flag, args);
    }
}

/// Camera and light directives of a scene.
pub fn write_script(scene: &Scene) -> String {
    let mut builder = ScriptBuilder::new();
    write_camera(&mut builder, &scene.camera);
    write_lights(&mut builder, &scene.lights);
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use embree_core::camera::{Dof, Pinhole};
    use embree_core::light::{HdriLight, TriangleLight};

    #[test]
    fn test_default_camera_directives() {
        let script = write_script(&Scene::new());
        assert_eq!(script, "-vp 300 300 300\n-vi 0 0 0\n-vu 0 1 0\n-angle 64\n");
    }

    #[test]
    fn test_dof_radius_only_when_non_zero() {
        let mut scene = Scene::new();
        scene.camera = Camera::Dof(Dof::default());
        assert!(!write_script(&scene).contains("-radius"));

        scene.camera = Camera::Dof(Dof {
            view: Pinhole {
                position: [400.0, 400.0, 400.0],
                ..Default::default()
            },
            radius: 10.0,
            focal_distance: 100.0,
        });
        let script = write_script(&scene);
        assert!(script.starts_with("-vp 400 400 400\n"));
        assert!(script.ends_with("-angle 64\n-radius 10\n"));
    }

    #[test]
    fn test_light_directive_fields() {
        let (flag, args) = light_directive(&Light::quad(
            [213.0, 548.77, 227.0],
            [130.0, 0.0, 0.0],
            [0.0, 0.0, 105.0],
            [50.0, 50.0, 50.0],
        ));
        assert_eq!(flag, "-quadlight");
        assert_eq!(args.join(" "), "213 548.77 227 130 0 0 0 0 105 50 50 50");

        let (flag, args) = light_directive(&Light::Hdri(HdriLight {
            intensity: [1.0, 1.0, 1.0],
            image: "env/sky.hdr".into(),
        }));
        assert_eq!(flag, "-hdrilight");
        assert_eq!(args, ["1", "1", "1", "env/sky.hdr"]);

        let (_, args) = light_directive(&Light::Hdri(HdriLight {
            intensity: [1.0, 1.0, 1.0],
            image: "my env/sky.hdr".into(),
        }));
        assert_eq!(args[3], "\"my env/sky.hdr\"");
    }

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("scene.xml"), "scene.xml");
        assert_eq!(quote_arg("my scene.xml"), "\"my scene.xml\"");
        assert_eq!(quote_arg(""), "\"\"");
    }

    #[test]
    fn test_ambient_and_point_lights_trail() {
        let lights = vec![
            Light::ambient([0.5, 0.5, 0.5]),
            Light::distant([0.0, -1.0, 0.0], [1.0, 1.0, 1.0], 0.25),
            Light::point([0.0, 50.0, 0.0], [10.0, 10.0, 10.0]),
            Light::Triangle(TriangleLight {
                v0: [0.0, 0.0, 0.0],
                v1: [1.0, 0.0, 0.0],
                v2: [0.0, 1.0, 0.0],
                intensity: [2.0, 2.0, 2.0],
            }),
        ];
        let mut builder = ScriptBuilder::new();
        write_lights(&mut builder, &lights);
        let script = builder.finish();
        let flags: Vec<&str> = script
            .lines()
            .map(|l| l.split(' ').next().unwrap())
            .collect();
        assert_eq!(
            flags,
            ["-distantlight", "-trianglelight", "-ambientlight", "-pointlight"]
        );
    }

    #[test]
    fn test_switch_writes_bare_flag() {
        let mut builder = ScriptBuilder::new();
        builder.switch("-fullscreen", false).switch("--no-logging", true);
        assert_eq!(builder.finish(), "--no-logging\n");
    }
}
