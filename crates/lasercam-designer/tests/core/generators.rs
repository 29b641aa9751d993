use lasercam_core::ShapeError;
use lasercam_designer::gcode_gen::GcodeEmitter;
use lasercam_designer::generators::compile_shape;
use lasercam_designer::shapes::{
    Ancestor, BooleanOperation, Bounds, Point, Shape, ShapeKind, VectorNetwork, VectorSegment,
};
use lasercam_designer::toolpath::MotionCommand;
use lasercam_settings::LaserSettings;

fn render(shape: &Shape, settings: &LaserSettings) -> String {
    let toolpath = compile_shape(shape, &[], settings).unwrap();
    GcodeEmitter::new().generate(&toolpath)
}

#[test]
fn test_rectangle_exact_output() {
    let settings = LaserSettings::new(1000.0, 3000.0, 500.0);
    let gcode = render(&Shape::rectangle("", 0.0, 0.0, 10.0, 5.0), &settings);
    assert_eq!(
        gcode,
        "; RECTANGLE\n\
         G0 X0.000 Y0.000 F3000 S0\n\
         G1 X10.000 Y0.000 F1000 S500\n\
         G1 X10.000 Y5.000 F1000 S500\n\
         G1 X0.000 Y5.000 F1000 S500\n\
         G1 X0.000 Y0.000 F1000 S500\n"
    );
}

#[test]
fn test_circle_is_single_full_arc() {
    let gcode = render(
        &Shape::ellipse("Hole", 0.0, 0.0, 20.0, 20.0),
        &LaserSettings::default(),
    );
    assert_eq!(
        gcode,
        "; ELLIPSE - \"Hole\"\n\
         G0 X20.000 Y10.000 F3000 S0\n\
         G3 X20.000 Y10.000 I-10.000 J0.000 F1000 S255\n"
    );
}

#[test]
fn test_line_uses_directed_size() {
    let gcode = render(
        &Shape::line("Cut", 5.0, 5.0, -3.0, 4.0),
        &LaserSettings::default(),
    );
    assert!(gcode.contains("G0 X5.000 Y5.000 F3000 S0\n"));
    assert!(gcode.contains("G1 X2.000 Y9.000 F1000 S255\n"));
}

#[test]
fn test_bounding_box_kinds_are_labelled() {
    let settings = LaserSettings::default();
    let text = render(&Shape::text("Title", 0.0, 0.0, 4.0, 2.0), &settings);
    assert!(text.starts_with("; TEXT (bounding box)\n"));
    assert_eq!(text.matches("G1 ").count(), 4);

    let boolean = Shape::new(
        "Merged",
        0.0,
        0.0,
        4.0,
        2.0,
        ShapeKind::BooleanOperation {
            operation: BooleanOperation::Subtract,
        },
    );
    assert!(render(&boolean, &settings).starts_with("; BOOLEAN_OPERATION (SUBTRACT)\n"));
}

#[test]
fn test_empty_vector_falls_back_to_bounding_box() {
    let shape = Shape::vector_network(
        "Blob",
        1.0,
        2.0,
        3.0,
        4.0,
        VectorNetwork::default(),
    );
    let gcode = render(&shape, &LaserSettings::default());
    assert!(gcode.contains("; VECTOR (no path data - using bounding box)\n"));
    assert!(gcode.contains("G0 X1.000 Y2.000 F3000 S0\n"));
    assert!(gcode.contains("G1 X4.000 Y6.000 F1000 S255\n"));
}

#[test]
fn test_vector_network_with_curve() {
    let network = VectorNetwork::new(
        vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)],
        vec![
            VectorSegment::line(0, 1),
            VectorSegment::curve(1, 2, Point::new(5.0, 0.0), Point::new(0.0, -5.0)),
        ],
    );
    let shape = Shape::vector_network("Hook", 100.0, 0.0, 10.0, 10.0, network);
    let toolpath = compile_shape(&shape, &[], &LaserSettings::default()).unwrap();

    let cuts = toolpath
        .commands()
        .iter()
        .filter(|c| matches!(c, MotionCommand::Cut { .. }))
        .count();
    assert_eq!(cuts, 1 + 16);
    assert_eq!(toolpath.first_point(), Some(Point::new(100.0, 0.0)));
    let last = toolpath.last_point().unwrap();
    assert!(last.distance_to(&Point::new(110.0, 10.0)) < 1e-9);
}

#[test]
fn test_vector_paths_used_without_network() {
    let shape = Shape::vector_paths(
        "Tri",
        10.0,
        10.0,
        5.0,
        5.0,
        vec!["M 0 0 L 5 0 L 5 5 Z".to_string()],
    );
    let gcode = render(&shape, &LaserSettings::default());
    assert!(gcode.contains("; Vector Paths Processing\n"));
    assert!(gcode.ends_with("G1 X10.000 Y10.000 F1000 S255\n"));
}

#[test]
fn test_malformed_network_is_shape_error() {
    let network = VectorNetwork::new(vec![Point::default()], vec![VectorSegment::line(0, 3)]);
    let shape = Shape::vector_network("Broken", 0.0, 0.0, 1.0, 1.0, network);
    assert!(matches!(
        compile_shape(&shape, &[], &LaserSettings::default()),
        Err(ShapeError::MalformedVectorNetwork { vertex: 3, .. })
    ));
}

#[test]
fn test_empty_frame_draws_bounding_box() {
    let frame = Shape::frame("Board", 2.0, 3.0, 10.0, 10.0, vec![]);
    let gcode = render(&frame, &LaserSettings::default());
    assert_eq!(
        gcode.lines().take(3).collect::<Vec<_>>(),
        vec![
            "; FRAME START - \"Board\"",
            "; FRAME (empty - drawing bounding box)",
            "G0 X2.000 Y3.000 F3000 S0",
        ]
    );
    assert!(gcode.ends_with("; FRAME END - \"Board\"\n"));
}

#[test]
fn test_ancestors_translate_shape() {
    let shape = Shape::rectangle("r", 1.0, 1.0, 2.0, 2.0);
    let ancestors = vec![Ancestor::new("Frame", Some(Point::new(10.0, 20.0)))];
    let toolpath = compile_shape(&shape, &ancestors, &LaserSettings::default()).unwrap();
    assert_eq!(toolpath.first_point(), Some(Point::new(11.0, 21.0)));
}

#[test]
fn test_absolute_bounds_ignore_ancestors() {
    let shape = Shape::rectangle("r", 1.0, 1.0, 2.0, 2.0)
        .with_absolute_bounds(Bounds::new(50.0, 60.0, 2.0, 2.0));
    let ancestors = vec![Ancestor::new("Frame", Some(Point::new(10.0, 20.0)))];
    let toolpath = compile_shape(&shape, &ancestors, &LaserSettings::default()).unwrap();
    assert_eq!(toolpath.first_point(), Some(Point::new(50.0, 60.0)));
}

fn motion_points(shape: &Shape) -> Vec<Point> {
    compile_shape(shape, &[], &LaserSettings::default())
        .unwrap()
        .commands()
        .iter()
        .filter_map(MotionCommand::endpoint)
        .collect()
}

#[test]
fn test_star_default_inner_ratio() {
    let points = motion_points(&Shape::star("Badge", 0.0, 0.0, 20.0, 20.0, 5, None));
    let center = Point::new(10.0, 10.0);

    assert_eq!(points.len(), 11);
    for (i, point) in points.iter().enumerate() {
        let expected = if i % 2 == 0 { 10.0 } else { 5.0 };
        assert!((point.distance_to(&center) - expected).abs() < 1e-9);
    }
}

#[test]
fn test_star_zero_points_draws_five() {
    let points = motion_points(&Shape::star("Badge", 0.0, 0.0, 20.0, 20.0, 0, None));
    assert_eq!(points.len(), 11);
    assert!(points[10].distance_to(&points[0]) < 1e-9);
}

#[test]
fn test_container_skips_failed_child() {
    let broken = Shape::vector_network(
        "Broken",
        0.0,
        0.0,
        1.0,
        1.0,
        VectorNetwork::new(Vec::new(), vec![VectorSegment::line(0, 1)]),
    );
    let group = Shape::group(
        "Parts",
        0.0,
        0.0,
        vec![broken, Shape::rectangle("Plate", 2.0, 2.0, 4.0, 4.0)],
    );
    let gcode = render(&group, &LaserSettings::default());

    assert!(gcode.contains("; Skipped shape: Broken (Malformed vector network"));
    assert!(gcode.contains("; RECTANGLE - \"Plate\"\nG0 X2.000 Y2.000 F3000 S0\n"));
    assert!(gcode.ends_with("; GROUP END - \"Parts\"\n"));
}
