pub mod execution_provider;
pub mod fixed_landmark_provider;
pub mod model_resolver;
pub mod onnx_blazeface_detector;
pub mod onnx_face_mesh_provider;
