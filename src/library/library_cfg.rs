use std::path::PathBuf;

/// Describes where the indexed images live. Image `i` is found at
/// `<dir><prefix><i><suffix>`.
#[derive(Debug, Clone)]
pub struct ImageSetCfg {
    pub dir: PathBuf,
    pub prefix: String,
    pub suffix: String,
    pub num_images: usize,
}

impl ImageSetCfg {
    pub fn image_path(&self, image_index: usize) -> PathBuf {
        //plain string concatenation, so that a dir given as "images/" or a prefix containing a
        //separator behave the same way as they would when typed into a shell.
        let mut path = self.dir.clone().into_os_string();
        path.push(format!("{}{}{}", self.prefix, image_index, self.suffix));
        PathBuf::from(path)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DescriptorCfg {
    pub num_bins: u32,
    pub num_features: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchCfg {
    pub k: usize,
    pub parallel: bool,
}
