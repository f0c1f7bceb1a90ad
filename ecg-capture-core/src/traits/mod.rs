pub mod acquisition_delegate;
pub mod analog_channel;
pub mod codec;
pub mod digital_io;
