/// A macro to build a `ConfigBundle` from `key: value` pairs.
///
/// # Examples
///
/// ```
/// use agent_configs::config_bundle;
/// use agent_configs::types::Value;
///
/// let base = config_bundle! {
///     num_agents: 8,
///     use_gpu: false,
/// };
///
/// let variant = config_bundle!(base.clone() => {
///     use_gpu: true,
///     input_size: Value::tuple([13, 13]),
/// });
///
/// assert_eq!(variant.len(), 3);
/// assert_eq!(variant.get::<bool>("use_gpu").unwrap(), true);
/// ```
///
/// The first form creates a bundle holding exactly the listed settings. The
/// second form starts from a copy of the base bundle and overrides or extends
/// it, so every base key is present in the result.
#[macro_export]
macro_rules! config_bundle {
    ($( $key:ident : $value:expr ),* $(,)?) => {
        $crate::builders::BundleBuilder::new()
            $( .set(stringify!($key), $value) )*
            .build()
    };
    ($base:expr => { $( $key:ident : $value:expr ),* $(,)? }) => {
        $crate::builders::BundleBuilder::from_base($base)
            $( .set(stringify!($key), $value) )*
            .build()
    };
}
