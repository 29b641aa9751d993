use lasercam_designer::shapes::{Point, VectorNetwork, VectorSegment};
use lasercam_designer::toolpath::{MotionCommand, ToolpathBuilder};
use lasercam_designer::vector_paths::{
    group_segments_into_paths, tokenize_path_data, trace_path_data, trace_vector_network,
};
use lasercam_settings::LaserSettings;

fn endpoints(builder: ToolpathBuilder) -> Vec<Point> {
    builder
        .build()
        .commands()
        .iter()
        .filter_map(MotionCommand::endpoint)
        .collect()
}

#[test]
fn test_square_network_is_one_chain() {
    let network = VectorNetwork::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ],
        vec![
            VectorSegment::line(2, 3),
            VectorSegment::line(0, 1),
            VectorSegment::line(3, 0),
            VectorSegment::line(1, 2),
        ],
    );
    assert_eq!(
        group_segments_into_paths(&network.segments),
        vec![vec![0, 2, 1, 3]]
    );

    let mut builder = ToolpathBuilder::new(&LaserSettings::default());
    trace_vector_network(&mut builder, &network, Point::new(1.0, 1.0)).unwrap();
    let points = endpoints(builder);
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], Point::new(5.0, 5.0));
    assert_eq!(points[4], Point::new(5.0, 5.0));
}

#[test]
fn test_chains_only_extend_forward() {
    // 0 -> 1 is found after 1 -> 2 was seeded, so it is not prepended.
    let segments = vec![VectorSegment::line(1, 2), VectorSegment::line(0, 1)];
    assert_eq!(group_segments_into_paths(&segments), vec![vec![0], vec![1]]);

    let segments = vec![
        VectorSegment::line(0, 1),
        VectorSegment::line(5, 6),
        VectorSegment::line(1, 0),
    ];
    assert_eq!(
        group_segments_into_paths(&segments),
        vec![vec![0, 2], vec![1]]
    );
}

#[test]
fn test_absolute_horizontal_vertical() {
    let mut builder = ToolpathBuilder::new(&LaserSettings::default());
    trace_path_data(&mut builder, "M10,10H20V30H10Z", Point::default());
    assert_eq!(
        endpoints(builder),
        vec![
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
            Point::new(20.0, 30.0),
            Point::new(10.0, 30.0),
            Point::new(10.0, 10.0),
        ]
    );
}

#[test]
fn test_relative_cubic_flattened() {
    let mut builder = ToolpathBuilder::new(&LaserSettings::default());
    trace_path_data(&mut builder, "M 0 0 c 0 10 10 10 10 0", Point::default());
    let points = endpoints(builder);
    assert_eq!(points.len(), 1 + 16);
    assert!(points[16].distance_to(&Point::new(10.0, 0.0)) < 1e-9);
}

#[test]
fn test_polyline_pairs_and_odd_param() {
    let commands = tokenize_path_data("M0 0 L1 1 2 2 3");
    assert_eq!(commands[1].params, vec![1.0, 1.0, 2.0, 2.0, 3.0]);

    let mut builder = ToolpathBuilder::new(&LaserSettings::default());
    trace_path_data(&mut builder, "M0 0 L1 1 2 2 3", Point::default());
    // The dangling coordinate is ignored.
    assert_eq!(endpoints(builder).len(), 3);
}

#[test]
fn test_move_resets_close_target() {
    let mut builder = ToolpathBuilder::new(&LaserSettings::default());
    trace_path_data(&mut builder, "M0 0 L5 0 M10 10 L15 10 Z", Point::default());
    assert_eq!(endpoints(builder).last(), Some(&Point::new(10.0, 10.0)));
}
