use std::{fs, path::Path};

use cagewarp_imgproc::point::Point2f;

use crate::error::IoError;

/// Read cage anchor points from a whitespace-separated text file.
///
/// The file holds `x y` floating-point pairs, one vertex per line.
/// Reading stops silently at the first token that fails to parse as a
/// float and at a trailing unpaired value; whatever was read up to that
/// point is returned. Only failing to open or read the file is an
/// error.
///
/// # Arguments
///
/// * `file_path` - The path to the cage points file.
///
/// # Returns
///
/// The anchor points in file order.
pub fn read_cage_points(file_path: impl AsRef<Path>) -> Result<Vec<Point2f>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let content = fs::read_to_string(file_path)?;

    let mut points = Vec::new();
    let mut tokens = content.split_whitespace();
    loop {
        let Some(token_x) = tokens.next() else {
            break;
        };
        let Ok(x) = token_x.parse::<f32>() else {
            log::debug!("cage file {file_path:?}: stopping at unparsable token {token_x:?}");
            break;
        };
        let Some(token_y) = tokens.next() else {
            log::debug!("cage file {file_path:?}: dropping trailing unpaired value {x}");
            break;
        };
        let Ok(y) = token_y.parse::<f32>() else {
            log::debug!("cage file {file_path:?}: stopping at unparsable token {token_y:?}");
            break;
        };
        points.push(Point2f::new(x, y));
    }

    Ok(points)
}
