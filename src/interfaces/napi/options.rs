use crate::domain::tree::BuildOptions;

#[napi(js_name = "AccumulatorOptions")]
#[derive(Clone)]
pub struct AccumulatorOptionsJs {
  pub parallel_threshold: u32,
}

impl Default for AccumulatorOptionsJs {
  fn default() -> Self {
    Self {
      parallel_threshold: BuildOptions::default().parallel_threshold as u32,
    }
  }
}

impl From<&AccumulatorOptionsJs> for BuildOptions {
  fn from(options: &AccumulatorOptionsJs) -> Self {
    Self {
      parallel_threshold: options.parallel_threshold as usize,
    }
  }
}
