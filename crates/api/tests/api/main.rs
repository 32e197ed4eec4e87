mod dataset;
mod helpers;
mod home;
