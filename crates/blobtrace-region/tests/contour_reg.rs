//! Contour labeling regression test
//!
//! Checks component descriptors, traced point order and label images for
//! a set of small hand-made patterns.
//!
//! Run with:
//! ```
//! cargo test -p blobtrace-region --test contour_reg
//! ```

use blobtrace_core::{Gray, GrayImage, Point2D};
use blobtrace_region::{ConnectivityType, ContourOptions, LinearContourLabeler};
use blobtrace_test::{RegParams, parse_binary_pattern};

/// 3x3 ring with a one pixel hole and a spur touching it diagonally
const RING_WITH_SPUR: [&str; 7] = [
    ".............",
    ".............",
    "....###......",
    "....#.#......",
    "....###......",
    ".......#.....",
    ".............",
];

fn pts(list: &[(i32, i32)]) -> Vec<Point2D> {
    list.iter().map(|&p| Point2D::from(p)).collect()
}

fn load(labeler: &LinearContourLabeler, set: usize) -> Vec<Point2D> {
    let mut out = Vec::new();
    labeler.load_contour(set, &mut out).unwrap();
    out
}

#[test]
fn contour_square_reg() {
    let mut rp = RegParams::new("contour_square");

    let square = parse_binary_pattern(&["###", "###", "###"]).unwrap();
    let expected = pts(&[
        (0, 0),
        (1, 0),
        (2, 0),
        (2, 1),
        (2, 2),
        (1, 2),
        (0, 2),
        (0, 1),
    ]);

    for rule in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
        let mut labeler = LinearContourLabeler::new(rule);
        let mut labeled = Gray::new(0, 0);
        labeler.process(&square, &mut labeled).unwrap();

        rp.compare_values(1.0, labeler.contours().len() as f64, 0.0);
        rp.compare_values(0.0, labeler.contours()[0].internal_indexes.len() as f64, 0.0);
        rp.compare_points(&expected, &load(&labeler, 0));
        rp.compare_gray(&Gray::from_vec(3, 3, vec![1i32; 9]).unwrap(), &labeled);
    }

    assert!(rp.cleanup(), "contour_square regression test failed");
}

#[test]
fn contour_single_pixel_reg() {
    let mut rp = RegParams::new("contour_single_pixel");

    let pixel = parse_binary_pattern(&["1"]).unwrap();
    for rule in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
        let mut labeler = LinearContourLabeler::new(rule);
        let mut labeled = Gray::new(0, 0);
        labeler.process(&pixel, &mut labeled).unwrap();

        rp.compare_values(1.0, labeler.contours().len() as f64, 0.0);
        rp.compare_values(1.0, labeler.packed_points().number_of_sets() as f64, 0.0);
        rp.compare_points(&pts(&[(0, 0)]), &load(&labeler, 0));
        rp.compare_values(1.0, labeled.get(0, 0).unwrap_or(0) as f64, 0.0);
    }

    assert!(rp.cleanup(), "contour_single_pixel regression test failed");
}

#[test]
fn contour_ring_reg() {
    let mut rp = RegParams::new("contour_ring");
    let binary = parse_binary_pattern(&RING_WITH_SPUR).unwrap();

    // 8-connected: the spur belongs to the ring
    let mut labeler = LinearContourLabeler::new(ConnectivityType::EightWay);
    let mut labeled = Gray::new(0, 0);
    labeler.process(&binary, &mut labeled).unwrap();
    rp.show_gray("8-connected labels", &labeled);

    rp.compare_values(1.0, labeler.contours().len() as f64, 0.0);
    let ring = &labeler.contours()[0];
    rp.compare_values(1.0, ring.id as f64, 0.0);
    rp.compare_values(0.0, ring.external_index as f64, 0.0);
    rp.compare_values(1.0, ring.internal_indexes.len() as f64, 0.0);
    rp.compare_points(
        &pts(&[
            (4, 2),
            (5, 2),
            (6, 2),
            (6, 3),
            (6, 4),
            (7, 5),
            (6, 4),
            (5, 4),
            (4, 4),
            (4, 3),
        ]),
        &load(&labeler, ring.external_index),
    );
    rp.compare_points(
        &pts(&[(5, 2), (4, 3), (5, 4), (6, 3)]),
        &load(&labeler, ring.internal_indexes[0]),
    );

    let expected_labels = {
        let mut img = Gray::<i32>::new(binary.width(), binary.height());
        for y in 0..binary.height() {
            for x in 0..binary.width() {
                img.set(x, y, binary.get(x, y).unwrap_or(0) as i32).unwrap();
            }
        }
        img
    };
    rp.compare_gray(&expected_labels, &labeled);

    // 4-connected: the spur is its own component
    labeler.set_connectivity(ConnectivityType::FourWay);
    labeler.process(&binary, &mut labeled).unwrap();
    rp.show_gray("4-connected labels", &labeled);

    rp.compare_values(2.0, labeler.contours().len() as f64, 0.0);
    rp.compare_values(8.0, load(&labeler, 0).len() as f64, 0.0);
    rp.compare_values(8.0, load(&labeler, 1).len() as f64, 0.0);
    rp.compare_values(2.0, labeler.contours()[1].external_index as f64, 0.0);
    rp.compare_points(&pts(&[(7, 5)]), &load(&labeler, 2));
    rp.compare_values(2.0, labeled.get(7, 5).unwrap_or(0) as f64, 0.0);
    rp.compare_values(1.0, labeled.get(6, 4).unwrap_or(0) as f64, 0.0);

    assert!(rp.cleanup(), "contour_ring regression test failed");
}

#[test]
fn contour_filter_reg() {
    let mut rp = RegParams::new("contour_filter");
    let binary = parse_binary_pattern(&RING_WITH_SPUR).unwrap();
    let eight = ContourOptions::new(ConnectivityType::EightWay);

    // (options, external size, internal size)
    let cases = [
        (eight.with_save_internal_contours(false), 10, 0),
        (eight.with_max_contour_size(10), 0, 4),
        (eight.with_max_contour_size(5), 0, 4),
        (eight.with_max_contour_size(11), 10, 4),
        (eight.with_min_contour_size(5), 10, 0),
        (eight.with_min_contour_size(11), 0, 0),
    ];

    for (options, external, internal) in cases {
        let mut labeler = LinearContourLabeler::with_options(options).unwrap();
        let mut labeled = Gray::new(0, 0);
        labeler.process(&binary, &mut labeled).unwrap();

        // descriptors and labels do not depend on the filter
        rp.compare_values(1.0, labeler.contours().len() as f64, 0.0);
        rp.compare_values(2.0, labeler.packed_points().number_of_sets() as f64, 0.0);
        rp.compare_values(1.0, labeled.get(7, 5).unwrap_or(0) as f64, 0.0);

        rp.compare_values(external as f64, load(&labeler, 0).len() as f64, 0.0);
        rp.compare_values(internal as f64, load(&labeler, 1).len() as f64, 0.0);
    }

    assert!(rp.cleanup(), "contour_filter regression test failed");
}

#[test]
fn contour_nested_reg() {
    let mut rp = RegParams::new("contour_nested");

    // ring containing a dot inside its hole, and a second blob with two holes
    let binary = parse_binary_pattern(&[
        "#######....",
        "#.....#....",
        "#.###.#.###",
        "#.###.#.#.#",
        "#.....#.###",
        "#######.#.#",
        "........###",
    ])
    .unwrap();

    for rule in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
        let mut labeler = LinearContourLabeler::new(rule);
        let mut labeled = Gray::new(0, 0);
        labeler.process(&binary, &mut labeled).unwrap();

        rp.compare_values(3.0, labeler.contours().len() as f64, 0.0);
        let holes: Vec<usize> = labeler
            .contours()
            .iter()
            .map(|c| c.internal_indexes.len())
            .collect();
        rp.compare_values(1.0, holes[0] as f64, 0.0);
        rp.compare_values(0.0, holes[1] as f64, 0.0);
        rp.compare_values(2.0, holes[2] as f64, 0.0);

        // ids follow raster order of the top-left pixel
        rp.compare_values(1.0, labeled.get(0, 0).unwrap_or(0) as f64, 0.0);
        rp.compare_values(2.0, labeled.get(2, 2).unwrap_or(0) as f64, 0.0);
        rp.compare_values(3.0, labeled.get(8, 2).unwrap_or(0) as f64, 0.0);
        rp.compare_values(0.0, labeled.get(1, 1).unwrap_or(-1) as f64, 0.0);
        rp.compare_values(0.0, labeled.get(9, 3).unwrap_or(-1) as f64, 0.0);
    }

    assert!(rp.cleanup(), "contour_nested regression test failed");
}

#[test]
fn contour_idempotence_reg() {
    let mut rp = RegParams::new("contour_idempotence");
    let binary = parse_binary_pattern(&RING_WITH_SPUR).unwrap();

    let mut labeler = LinearContourLabeler::new(ConnectivityType::EightWay);
    let mut first = Gray::new(0, 0);
    labeler.process(&binary, &mut first).unwrap();
    let first_contours = labeler.component_contours().unwrap();

    // a different image in between must not leak into the next result
    let mut scratch = Gray::new(0, 0);
    labeler
        .process(&parse_binary_pattern(&["##.", "#.#"]).unwrap(), &mut scratch)
        .unwrap();

    let mut second = Gray::new(0, 0);
    labeler.process(&binary, &mut second).unwrap();
    let second_contours = labeler.component_contours().unwrap();

    rp.compare_gray(&first, &second);
    rp.compare_values(first_contours.len() as f64, second_contours.len() as f64, 0.0);
    for (a, b) in first_contours.iter().zip(&second_contours) {
        rp.compare_points(&a.external, &b.external);
        for (ha, hb) in a.internal.iter().zip(&b.internal) {
            rp.compare_points(ha, hb);
        }
    }

    // processing does not modify the input
    rp.compare_gray(&parse_binary_pattern(&RING_WITH_SPUR).unwrap(), &binary);

    assert!(rp.cleanup(), "contour_idempotence regression test failed");
}

#[test]
fn contour_view_reg() {
    let mut rp = RegParams::new("contour_view");
    let binary = parse_binary_pattern(&RING_WITH_SPUR).unwrap();

    // label only the ring, through a view into the full image
    let view = binary.sub_image(3, 1, 8, 6).unwrap();
    let mut labeler = LinearContourLabeler::new(ConnectivityType::FourWay);
    let mut labeled = Gray::new(0, 0);
    labeler.process(&view, &mut labeled).unwrap();

    rp.compare_values(5.0, labeled.width() as f64, 0.0);
    rp.compare_values(5.0, labeled.height() as f64, 0.0);
    rp.compare_values(2.0, labeler.contours().len() as f64, 0.0);
    rp.compare_points(
        &pts(&[
            (1, 1),
            (2, 1),
            (3, 1),
            (3, 2),
            (3, 3),
            (2, 3),
            (1, 3),
            (1, 2),
        ]),
        &load(&labeler, 0),
    );
    rp.compare_points(&pts(&[(4, 4)]), &load(&labeler, 2));

    assert!(rp.cleanup(), "contour_view regression test failed");
}
