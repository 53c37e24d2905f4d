//! Datasets from hierarchical HDF5 containers

// crate modules
use crate::error::{Error, Result};
use crate::matrix::DataMatrix;
use crate::reader::DatasetInfo;

// standard library
use std::path::Path;

// external crates
use log::debug;

/// Read the dataset at a slash separated `locator` as `f64` values
pub(crate) fn read_dataset(path: &Path, locator: &str) -> Result<DataMatrix> {
    let file = ::hdf5::File::open(path)?;
    let locator = locator.trim_matches('/');

    // anything that does not resolve to a dataset, groups included
    let dataset = file
        .dataset(locator)
        .map_err(|_| Error::DatasetNotFound(locator.to_string()))?;

    let shape = dataset.shape();
    debug!("Reading dataset /{locator} with shape {shape:?}");
    let values = dataset.read_raw::<f64>()?;

    DataMatrix::from_shape_vec(&shape, values)
}

/// Every dataset in the container, sorted by full path
pub(crate) fn list_datasets(path: &Path) -> Result<Vec<DatasetInfo>> {
    let file = ::hdf5::File::open(path)?;
    let mut list = Vec::new();
    collect_datasets(&file, &mut list)?;
    list.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(list)
}

/// Walk down every group recursively
fn collect_datasets(group: &::hdf5::Group, list: &mut Vec<DatasetInfo>) -> Result<()> {
    for dataset in group.datasets()? {
        list.push(DatasetInfo {
            path: dataset.name(),
            shape: dataset.shape(),
        });
    }

    for subgroup in group.groups()? {
        collect_datasets(&subgroup, list)?;
    }

    Ok(())
}
