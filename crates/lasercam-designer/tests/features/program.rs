use lasercam_core::{Error, ValidationError};
use lasercam_designer::program::{generate_program, ProgramAssembler};
use lasercam_designer::scene::SelectedNode;
use lasercam_designer::shapes::{Shape, ShapeKind, VectorNetwork, VectorSegment};
use lasercam_settings::{Config, LaserSettings};

fn standard_config(settings: LaserSettings) -> Config {
    let mut config = Config::default();
    config.laser = settings;
    config.output.optimize_travel = false;
    config
}

fn unsupported(name: &str) -> Shape {
    Shape::new(
        name,
        0.0,
        0.0,
        1.0,
        1.0,
        ShapeKind::Unsupported {
            type_name: "STICKY".to_string(),
        },
    )
}

fn malformed_vector(name: &str) -> Shape {
    let network = VectorNetwork::new(Vec::new(), vec![VectorSegment::line(0, 1)]);
    Shape::vector_network(name, 0.0, 0.0, 1.0, 1.0, network)
}

#[test]
fn test_single_rectangle_program() {
    let config = standard_config(LaserSettings::new(1000.0, 3000.0, 500.0));
    let selection = vec![SelectedNode::new(Shape::rectangle("Box", 0.0, 0.0, 10.0, 5.0))];
    let gcode = generate_program(&selection, &config).unwrap();

    let expected = "\
; Generated by lasercam
; Selected objects: 1
; Feed rate: 1000 mm/min
; Rapid feed rate: 3000 mm/min
; Laser power: 500 (S parameter)
; Travel optimization: disabled
;
G21 ; Set units to millimeters
G90 ; Absolute positioning
G0 F3000 S0 ; Set rapid feed rate and ensure laser is off
G1 F1000 ; Set cutting feed rate
M3 I ; Enable laser inline mode
; Begin shape 1/1: Box
; RECTANGLE - \"Box\"
G0 X0.000 Y0.000 F3000 S0
G1 X10.000 Y0.000 F1000 S500
G1 X10.000 Y5.000 F1000 S500
G1 X0.000 Y5.000 F1000 S500
G1 X0.000 Y0.000 F1000 S500
; End shape 1/1: Box
; End of program
M5 I ; Disable laser inline mode
M30 ; Program end
";
    assert_eq!(gcode, expected);
}

#[test]
fn test_optimized_header_reports_travel() {
    let selection = vec![
        SelectedNode::new(Shape::rectangle("a", 0.0, 0.0, 1.0, 1.0)),
        SelectedNode::new(Shape::rectangle("c", 100.0, 0.0, 1.0, 1.0)),
        SelectedNode::new(Shape::rectangle("b", 50.0, 0.0, 1.0, 1.0)),
    ];
    let gcode = generate_program(&selection, &Config::default()).unwrap();

    assert!(gcode.contains("; Travel optimization: enabled\n"));
    assert!(gcode.contains("; Travel distance (original order): 150.000 mm\n"));
    assert!(gcode.contains("; Travel distance (optimized): 100.000 mm\n"));
    assert!(gcode.contains("; Travel saved: 33.3%\n"));
}

#[test]
fn test_non_inline_laser_mode() {
    let mut config = Config::default();
    config.output.inline_laser = false;
    let selection = vec![SelectedNode::new(Shape::rectangle("r", 0.0, 0.0, 1.0, 1.0))];
    let gcode = generate_program(&selection, &config).unwrap();
    assert!(gcode.contains("\nM3 ; Enable laser\n"));
    assert!(gcode.contains("\nM5 ; Disable laser\n"));
    assert!(!gcode.contains("M3 I"));
}

#[test]
fn test_empty_selection_rejected() {
    let err = generate_program(&[], &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::EmptySelection)
    ));
}

#[test]
fn test_zero_feed_rate_rejected_before_compiling() {
    // The malformed shape would be skipped if compilation ran.
    let config = standard_config(LaserSettings::new(0.0, 3000.0, 255.0));
    let selection = vec![SelectedNode::new(malformed_vector("bad"))];
    let err = generate_program(&selection, &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NonPositiveFeedRate { .. })
    ));
}

#[test]
fn test_negative_power_rejected() {
    let config = standard_config(LaserSettings::new(1000.0, 3000.0, -1.0));
    let selection = vec![SelectedNode::new(Shape::rectangle("r", 0.0, 0.0, 1.0, 1.0))];
    assert!(generate_program(&selection, &config)
        .unwrap_err()
        .is_validation_error());
}

#[test]
fn test_failed_shape_is_skipped() {
    let config = standard_config(LaserSettings::default());
    let selection = vec![
        SelectedNode::new(malformed_vector("Broken")),
        SelectedNode::new(Shape::rectangle("Good", 0.0, 0.0, 1.0, 1.0)),
    ];
    let gcode = generate_program(&selection, &config).unwrap();

    assert!(gcode.contains("; Skipped shape: Broken (Malformed vector network"));
    assert!(gcode.contains("; Begin shape 1/1: Good\n"));
    assert!(gcode.contains("; Skipped shapes: 1\n; End of program\n"));
    let skip_at = gcode.find("; Skipped shape: Broken").unwrap();
    let good_at = gcode.find("; Begin shape 1/1: Good").unwrap();
    assert!(skip_at < good_at);
}

#[test]
fn test_unsupported_shape_kept_as_note() {
    let config = standard_config(LaserSettings::default());
    let selection = vec![
        SelectedNode::new(Shape::rectangle("Good", 0.0, 0.0, 1.0, 1.0)),
        SelectedNode::new(unsupported("Note")),
    ];
    let gcode = generate_program(&selection, &config).unwrap();
    assert!(gcode.contains("; End shape 1/1: Good\n; Unsupported node type: STICKY\n"));
    assert!(!gcode.contains("Skipped shapes"));
}

#[test]
fn test_no_geometry_is_empty_result() {
    let selection = vec![
        SelectedNode::new(unsupported("a")),
        SelectedNode::new(malformed_vector("b")),
    ];
    let err = generate_program(&selection, &Config::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyResult { skipped: 1 }));
}

#[test]
fn test_assembler_is_reusable() {
    let assembler = ProgramAssembler::new(&Config::default());
    let selection = vec![SelectedNode::new(Shape::ellipse("e", 0.0, 0.0, 6.0, 3.0))];
    let first = assembler.assemble(&selection).unwrap();
    let second = assembler.assemble(&selection).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_nested_selection_counts_blocks() {
    let frame = Shape::frame(
        "Sheet",
        0.0,
        0.0,
        100.0,
        100.0,
        vec![
            Shape::rectangle("A", 0.0, 0.0, 1.0, 1.0),
            Shape::frame("Empty", 20.0, 20.0, 5.0, 5.0, vec![]),
        ],
    );
    let config = standard_config(LaserSettings::default());
    let gcode = generate_program(&[SelectedNode::new(frame)], &config).unwrap();

    assert!(gcode.contains("; Selected objects: 1\n"));
    assert!(gcode.contains("; Begin shape 1/2: Sheet > A\n"));
    assert!(gcode.contains("; Begin shape 2/2: Sheet > Empty\n"));
    assert!(gcode.contains("; FRAME (empty - drawing bounding box)\nG0 X20.000 Y20.000"));
}
