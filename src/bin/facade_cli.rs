#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run(std::env::args().skip(1).collect()) {
        eprintln!("facade_cli: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use facade_engine::facade::{
        Boundary, CurtainWallParams, FloorPlateParams, Guide, generate_curtain_wall, generate_floor_plate,
    };
    use facade_engine::geom::{GeomMesh, Point3, Solid};
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::{Path, PathBuf};

    /// Snapshot coordinates are rounded to this many decimals.
    const DECIMALS: usize = 6;

    const USAGE: &str = "usage:
  facade_cli list
  facade_cli run <scenario|all> [--out <dir>]

Without --out the snapshot is printed to stdout. With --out every scenario
writes <name>.snap and <name>.obj into <dir>.";

    #[derive(Debug, thiserror::Error)]
    pub enum CliError {
        #[error("{0}\n\n{USAGE}")]
        Usage(String),
        #[error("unknown scenario `{0}` (see `facade_cli list`)")]
        UnknownScenario(String),
        #[error("scenario {scenario} failed: {message}")]
        Scenario { scenario: &'static str, message: String },
        #[error("{path}: {source}")]
        Io { path: PathBuf, source: io::Error },
    }

    fn io_error(path: &Path) -> impl FnOnce(io::Error) -> CliError + '_ {
        move |source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn run(args: Vec<String>) -> Result<(), CliError> {
        let mut args = args.into_iter();
        match args.next().as_deref() {
            None | Some("-h" | "--help" | "help") => {
                println!("{USAGE}");
                Ok(())
            }
            Some("list") => {
                for scenario in SCENARIOS {
                    println!("{}", scenario.name);
                }
                Ok(())
            }
            Some("run") => {
                let target = args.next().ok_or_else(|| CliError::Usage("missing scenario".into()))?;
                let out_dir = match (args.next().as_deref(), args.next()) {
                    (None, _) => None,
                    (Some("--out"), Some(dir)) => Some(PathBuf::from(dir)),
                    (Some("--out"), None) => return Err(CliError::Usage("--out needs a directory".into())),
                    (Some(other), _) => return Err(CliError::Usage(format!("unknown option `{other}`"))),
                };
                let selected: Vec<&Scenario> = if target == "all" {
                    SCENARIOS.iter().collect()
                } else {
                    let scenario = SCENARIOS
                        .iter()
                        .find(|s| s.name == target)
                        .ok_or(CliError::UnknownScenario(target))?;
                    vec![scenario]
                };
                selected
                    .into_iter()
                    .try_for_each(|scenario| emit(scenario, out_dir.as_deref()))
            }
            Some(other) => Err(CliError::Usage(format!("unknown command `{other}`"))),
        }
    }

    fn emit(scenario: &Scenario, out_dir: Option<&Path>) -> Result<(), CliError> {
        let output = (scenario.build)().map_err(|message| CliError::Scenario {
            scenario: scenario.name,
            message,
        })?;
        let triangles: usize = output.parts.iter().map(|(_, solid)| solid.mesh.triangle_count()).sum();
        eprintln!("{}: {} solids, {triangles} triangles", scenario.name, output.parts.len());

        let Some(dir) = out_dir else {
            print!("{}", output.snapshot);
            return Ok(());
        };
        fs::create_dir_all(dir).map_err(io_error(dir))?;

        let snap_path = dir.join(format!("{}.snap", scenario.name));
        fs::write(&snap_path, &output.snapshot).map_err(io_error(&snap_path))?;

        let obj_path = dir.join(format!("{}.obj", scenario.name));
        write_obj(&obj_path, &output.parts).map_err(io_error(&obj_path))?;
        Ok(())
    }

    /// One `o` group per solid sharing a single vertex pool.
    fn write_obj(path: &Path, parts: &[(String, Solid)]) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        let mut base = 1_usize;
        for (name, solid) in parts {
            let GeomMesh {
                positions, indices, ..
            } = &solid.mesh;
            writeln!(w, "o {name}")?;
            for [x, y, z] in positions {
                writeln!(w, "v {x} {y} {z}")?;
            }
            for tri in indices.chunks_exact(3) {
                let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize + base);
                writeln!(w, "f {a} {b} {c}")?;
            }
            base += positions.len();
        }
        w.flush()
    }

    struct Output {
        parts: Vec<(String, Solid)>,
        snapshot: String,
    }

    struct Scenario {
        name: &'static str,
        build: fn() -> Result<Output, String>,
    }

    const SCENARIOS: &[Scenario] = &[
        Scenario {
            name: "straight_wall",
            build: || wall(&[[0.0, 0.0, 0.0], [4000.0, 0.0, 0.0]], 1),
        },
        Scenario {
            name: "l_shaped_wall",
            build: || wall(&[[0.0, 0.0, 0.0], [5400.0, 0.0, 0.0], [5400.0, 4050.0, 0.0]], 1),
        },
        Scenario {
            name: "zigzag_wall",
            build: || {
                wall(
                    &[[0.0, 0.0, 0.0], [2700.0, 1200.0, 0.0], [5400.0, 0.0, 0.0], [8100.0, 1200.0, 0.0]],
                    1,
                )
            },
        },
        Scenario {
            name: "two_story_box",
            build: || {
                wall(
                    &[
                        [0.0, 0.0, 0.0],
                        [6000.0, 0.0, 0.0],
                        [6000.0, 4000.0, 0.0],
                        [0.0, 4000.0, 0.0],
                        [0.0, 0.0, 0.0],
                    ],
                    2,
                )
            },
        },
        Scenario {
            name: "floor_plate_square",
            build: floor_plate_square,
        },
    ];

    fn wall(points: &[[f64; 3]], stories: usize) -> Result<Output, String> {
        let guide = Guide::new(points.iter().copied().map(Point3::from).collect()).map_err(|e| e.to_string())?;
        let params = CurtainWallParams {
            stories,
            ..CurtainWallParams::default()
        };
        let wall = generate_curtain_wall(&guide, &params).map_err(|e| e.to_string())?;

        let counts = wall.counts();
        let mut snapshot = format!(
            "mullions {}\ntransoms {}\nglass {}\n",
            counts.mullions, counts.transoms, counts.glass
        );
        let mut parts = Vec::new();
        for (idx, element) in wall.elements().enumerate() {
            let bay = element.bay.map_or_else(|| "-".to_owned(), |bay| bay.to_string());
            let _ = writeln!(
                snapshot,
                "{idx} {} story {} segment {} bay {bay}",
                element.kind, element.story, element.segment
            );
            describe_solid(&mut snapshot, &element.solid);
            parts.push((format!("{}_{idx}", element.kind), element.solid.clone()));
        }
        Ok(Output { parts, snapshot })
    }

    fn floor_plate_square() -> Result<Output, String> {
        let corners = [[0.0, 0.0], [6000.0, 0.0], [6000.0, 6000.0], [0.0, 6000.0]];
        let boundary = Boundary::new(corners.iter().map(|&[x, y]| Point3::new(x, y, 0.0)).collect())
            .map_err(|e| e.to_string())?;
        let params = FloorPlateParams {
            elevation: 3200.0,
            ..FloorPlateParams::default()
        };
        let plate = generate_floor_plate(&boundary, &params).map_err(|e| e.to_string())?;

        let mut snapshot = format!("layers {}\n", plate.layers.len());
        let mut parts = Vec::new();
        for (layer, solid) in plate.iter() {
            let _ = writeln!(snapshot, "{}", layer.name());
            describe_solid(&mut snapshot, solid);
            parts.push((layer.name().to_owned(), solid.clone()));
        }
        Ok(Output { parts, snapshot })
    }

    fn describe_solid(out: &mut String, solid: &Solid) {
        match solid.bbox() {
            Some(bbox) => {
                let _ = writeln!(out, "  min {}", fmt_point(bbox.min));
                let _ = writeln!(out, "  max {}", fmt_point(bbox.max));
            }
            None => out.push_str("  empty\n"),
        }
        let _ = writeln!(out, "  volume {}", fmt_num(solid.volume()));
        let _ = writeln!(out, "  mesh {}", solid.diagnostics.summary());
        for warning in &solid.diagnostics.warnings {
            let _ = writeln!(out, "  warning {warning}");
        }
    }

    fn fmt_point(p: Point3) -> String {
        format!("{} {} {}", fmt_num(p.x), fmt_num(p.y), fmt_num(p.z))
    }

    /// Fixed decimals with negative zero folded into zero.
    fn fmt_num(value: f64) -> String {
        let text = format!("{value:.DECIMALS$}");
        if text.trim_start_matches(['-', '0', '.']).is_empty() {
            format!("{:.DECIMALS$}", 0.0)
        } else {
            text
        }
    }
}
