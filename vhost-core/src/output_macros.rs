//! Output macros for the vhost CLI.
//!
//! Plain user-facing output; diagnostics go through `tracing` instead.


#[macro_export]
macro_rules! vhost_println {
    () => {
        println!();
    };
    ($($arg:tt)*) => {
        println!("{}", format!($($arg)*));
    }
}

#[macro_export]
macro_rules! vhost_error {
    ($($arg:tt)*) => {
        eprintln!("{}", format!($($arg)*));
    }
}


#[macro_export]
macro_rules! vhost_success {
    ($($arg:tt)*) => {
        eprintln!("✓ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! vhost_info {
    ($($arg:tt)*) => {
        eprintln!("ℹ {}", format!($($arg)*));
    };
}

#[macro_export]
macro_rules! vhost_warning {
    ($($arg:tt)*) => {
        eprintln!("⚠ {}", format!($($arg)*));
    };
}
