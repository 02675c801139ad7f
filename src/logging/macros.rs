/// Log within a named scope, honoring the scoped `LogConfig`.
#[macro_export]
macro_rules! scoped_log {
    ($level:ident, $scope:expr, $($arg:tt)*) => {
        if $crate::logging::get_log_config().enabled($scope, $crate::logging::Level::$level) {
            tracing::event!(tracing::Level::$level, scope = $scope, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! curve_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "curve", $($arg)*);
    };
}

#[macro_export]
macro_rules! pointer_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "pointer", $($arg)*);
    };
}

#[macro_export]
macro_rules! teleport_log {
    ($level:ident, $($arg:tt)*) => {
        $crate::scoped_log!($level, "teleport", $($arg)*);
    };
}
