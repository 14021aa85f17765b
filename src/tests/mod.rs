mod helper;

mod register;
