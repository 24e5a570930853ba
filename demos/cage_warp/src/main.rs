use argh::FromArgs;
use std::path::PathBuf;

use cagewarp::image::Image;
use cagewarp::imgproc::deform::CageDeformer;
use cagewarp::imgproc::draw;
use cagewarp::io::{cage, png};

#[derive(FromArgs)]
/// Warp an image through a pair of cage anchor polygons
struct Args {
    /// path to an input png image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path to the original cage points file
    #[argh(option, short = 'c')]
    cage_path: PathBuf,

    /// path to the transformed cage points file
    #[argh(option, short = 't')]
    transformed_cage_path: PathBuf,

    /// path to write the warped png image to
    #[argh(option, short = 'o')]
    output_path: PathBuf,

    /// draw the cage anchors and edges on the output image
    #[argh(switch)]
    overlay: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image and the two anchor polygons
    let image: Image<u8, 3> = png::read_image_png_rgb8(&args.image_path)?;
    let source_points = cage::read_cage_points(&args.cage_path)?;
    let target_points = cage::read_cage_points(&args.transformed_cage_path)?;

    log::info!(
        "loaded {} image, {} source anchors, {} target anchors",
        image.size(),
        source_points.len(),
        target_points.len()
    );

    let mut deformer = CageDeformer::new();
    if !deformer.set_cage(&source_points, &target_points) {
        log::warn!("cage polygons differ in length, warping with an unset cage");
    }

    let mut warped = deformer.warp(&image)?;

    if args.overlay {
        draw_cage_overlay(&mut warped, deformer.target_points());
    }

    png::write_image_png_rgb8(&args.output_path, &warped)?;
    log::info!("wrote warped image to {:?}", args.output_path);

    Ok(())
}

/// Mark each anchor with a small circle and connect it to the next one.
fn draw_cage_overlay(img: &mut Image<u8, 3>, points: &[cagewarp::imgproc::point::Point2f]) {
    draw::draw_polygon(img, points, [0, 255, 0]);
    for pt in points {
        draw::draw_circle(img, (pt.x as i64, pt.y as i64), 3, [255, 0, 0]);
    }
}
